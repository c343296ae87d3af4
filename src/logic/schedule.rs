//! Round-robin schedule generation per pool.

use crate::models::{GameMatch, Tournament, TournamentError, TournamentStatus};

/// Generate the complete round-robin schedule for every pool and move the
/// tournament to Active.
///
/// Pools are processed in ascending index. Within a pool the canonical
/// rotation schedule is used, so each team's matches are spread across rounds
/// rather than clustered. For a pool of K teams this yields K*(K-1)/2 matches,
/// each team appearing in exactly K-1 of them. A trailing pool with a single
/// team plays no matches.
pub fn generate_schedule(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::Pools {
        return Err(TournamentError::InvalidTransition);
    }
    let pool_count = tournament.pool_count();
    let has_playable_pool = (0..pool_count).any(|p| tournament.pool_teams(p).len() >= 2);
    if !has_playable_pool {
        return Err(TournamentError::PreconditionFailed {
            reason: "Need at least one pool with two teams to schedule matches",
        });
    }

    let mut matches = Vec::new();
    for pool_id in 0..pool_count {
        let team_ids: Vec<_> = tournament
            .pool_teams(pool_id)
            .iter()
            .map(|t| t.id)
            .collect();
        for (a, b) in round_robin_pairings(team_ids.len()) {
            matches.push(GameMatch::new(
                tournament.id,
                pool_id,
                team_ids[a],
                team_ids[b],
            ));
        }
    }

    tournament.matches = matches;
    tournament.status = TournamentStatus::Active;

    Ok(())
}

/// Rotation (circle) pairings for `n` participants: all n*(n-1)/2 unordered
/// pairs, emitted round by round. Slot 0 stays fixed while the rest rotate;
/// odd `n` gets a bye slot whose pairings are skipped.
fn round_robin_pairings(n: usize) -> Vec<(usize, usize)> {
    if n < 2 {
        return Vec::new();
    }
    // Even-size slot ring; index `n` is the bye when n is odd.
    let slots = if n % 2 == 0 { n } else { n + 1 };
    let mut ring: Vec<usize> = (0..slots).collect();
    let mut pairs = Vec::with_capacity(n * (n - 1) / 2);
    for _ in 0..slots - 1 {
        for i in 0..slots / 2 {
            let a = ring[i];
            let b = ring[slots - 1 - i];
            if a < n && b < n {
                pairs.push(if a < b { (a, b) } else { (b, a) });
            }
        }
        ring[1..].rotate_right(1);
    }
    pairs
}
