//! Pool formation: partition the roster into teams and pools.

use crate::models::{PoolId, Team, Tournament, TournamentError, TournamentStatus};

/// Form teams and pools from the current roster and move the tournament to Pools.
///
/// 1. Roster in join order (deterministic, first-come grouping).
/// 2. Consecutive chunks of `players_per_team` become one team each; a
///    remainder fails without creating anything.
/// 3. Teams fill pools in order, `teams_per_pool` at a time; the last pool may
///    be smaller.
///
/// Once formed, teams are fixed for the rest of the tournament; calling this
/// again fails with `InvalidTransition`.
pub fn form_pools(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::Setup {
        return Err(TournamentError::InvalidTransition);
    }
    let roster = tournament.players.len();
    if roster < Tournament::MIN_PLAYERS {
        return Err(TournamentError::PreconditionFailed {
            reason: "Need at least 4 players to form pools",
        });
    }
    let players_per_team = tournament.settings.players_per_team as usize;
    let teams_per_pool = tournament.settings.teams_per_pool as usize;

    let team_count = roster / players_per_team;
    if roster % players_per_team != 0 || team_count < 2 {
        return Err(TournamentError::InsufficientPlayers {
            players: roster,
            players_per_team: tournament.settings.players_per_team,
        });
    }

    // Build every team before touching the tournament so a failure leaves it unchanged.
    let mut teams: Vec<Team> = Vec::with_capacity(team_count);
    for (idx, chunk) in tournament.players.chunks_exact(players_per_team).enumerate() {
        let pool_id = (idx / teams_per_pool) as PoolId;
        let name = chunk
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(" / ");
        let players = chunk.iter().map(|p| p.id).collect();
        teams.push(Team::new(tournament.id, pool_id, name, players));
    }

    // Commit: back-fill team assignments, store teams, close the roster.
    for team in &teams {
        for &pid in &team.players {
            if let Some(p) = tournament.players.iter_mut().find(|p| p.id == pid) {
                p.team_id = Some(team.id);
            }
        }
    }
    tournament.teams = teams;
    tournament.status = TournamentStatus::Pools;

    Ok(())
}
