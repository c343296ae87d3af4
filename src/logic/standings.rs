//! Pool standings derived from finished matches.

use crate::models::{MatchStatus, PoolId, TeamId, Tournament, TournamentError};
use serde::Serialize;

/// One team's line in a pool table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TeamStanding {
    pub team_id: TeamId,
    pub team_name: String,
    pub wins: u32,
    pub losses: u32,
    pub points_for: u32,
    pub points_against: u32,
    pub point_diff: i64,
}

/// Compute the standings of one pool from its finished matches.
///
/// Derived on demand, never persisted: the same match set always yields the
/// same ordering. Teams rank by wins, then point differential, then points
/// scored; remaining ties keep team creation order.
pub fn pool_standings(
    tournament: &Tournament,
    pool_id: PoolId,
) -> Result<Vec<TeamStanding>, TournamentError> {
    let teams = tournament.pool_teams(pool_id);
    if teams.is_empty() {
        return Err(TournamentError::PoolNotFound(pool_id));
    }

    let mut rows: Vec<TeamStanding> = teams
        .iter()
        .map(|t| TeamStanding {
            team_id: t.id,
            team_name: t.name.clone(),
            wins: 0,
            losses: 0,
            points_for: 0,
            points_against: 0,
            point_diff: 0,
        })
        .collect();

    for m in tournament.matches.iter().filter(|m| m.pool_id == pool_id) {
        if m.status != MatchStatus::Finished {
            continue;
        }
        let sides = [
            (m.team_a, m.score_a, m.score_b),
            (m.team_b, m.score_b, m.score_a),
        ];
        for (team_id, scored, conceded) in sides {
            if let Some(row) = rows.iter_mut().find(|r| r.team_id == team_id) {
                row.points_for += scored;
                row.points_against += conceded;
                if m.winner == Some(team_id) {
                    row.wins += 1;
                } else {
                    row.losses += 1;
                }
            }
        }
    }
    for row in &mut rows {
        row.point_diff = i64::from(row.points_for) - i64::from(row.points_against);
    }

    // Stable sort keeps creation order for full ties.
    rows.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then(b.point_diff.cmp(&a.point_diff))
            .then(b.points_for.cmp(&a.points_for))
    });

    Ok(rows)
}
