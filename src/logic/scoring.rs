//! Score reporting: match start, live updates, decisive finish, tournament completion.

use crate::models::{MatchId, MatchStatus, Tournament, TournamentError, TournamentStatus};
use chrono::Utc;

/// Start a pending match. The tournament must be active.
pub fn start_match(tournament: &mut Tournament, match_id: MatchId) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::Active {
        return Err(TournamentError::InvalidTransition);
    }
    let m = tournament.match_mut(match_id)?;
    if m.status != MatchStatus::Pending {
        return Err(TournamentError::InvalidTransition);
    }
    m.status = MatchStatus::Active;
    m.start_time = Some(Utc::now());
    Ok(())
}

/// Record a live score for an active match. May be called repeatedly; each
/// call overwrites the previous scores and leaves the match active.
pub fn report_score(
    tournament: &mut Tournament,
    match_id: MatchId,
    score_a: u32,
    score_b: u32,
) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::Active {
        return Err(TournamentError::InvalidTransition);
    }
    let m = tournament.match_mut(match_id)?;
    if m.status != MatchStatus::Active {
        return Err(TournamentError::InvalidTransition);
    }
    m.score_a = score_a;
    m.score_b = score_b;
    Ok(())
}

/// Finish an active match with a decisive final score.
///
/// The scores must differ and the winner must reach the tournament's score
/// limit. Finishing is exactly-once: a second call fails with
/// `InvalidTransition`. When the last match finishes, the tournament itself
/// completes.
pub fn finish_match(
    tournament: &mut Tournament,
    match_id: MatchId,
    score_a: u32,
    score_b: u32,
) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::Active {
        return Err(TournamentError::InvalidTransition);
    }
    let score_limit = tournament.settings.score_limit;
    let m = tournament.match_mut(match_id)?;
    if m.status != MatchStatus::Active {
        return Err(TournamentError::InvalidTransition);
    }
    if score_a == score_b {
        return Err(TournamentError::TiedScore { score: score_a });
    }
    if score_a.max(score_b) < score_limit {
        return Err(TournamentError::InvalidInput {
            reason: "Neither score reaches the score limit",
        });
    }
    m.score_a = score_a;
    m.score_b = score_b;
    m.winner = Some(if score_a > score_b { m.team_a } else { m.team_b });
    m.status = MatchStatus::Finished;
    m.end_time = Some(Utc::now());

    complete_if_done(tournament);
    Ok(())
}

/// Close the tournament explicitly. Requires every match to be finished.
pub fn finish_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::Active {
        return Err(TournamentError::InvalidTransition);
    }
    if !tournament.all_matches_finished() {
        return Err(TournamentError::PreconditionFailed {
            reason: "All matches must be finished to close the tournament",
        });
    }
    tournament.status = TournamentStatus::Finished;
    Ok(())
}

/// Idempotent check: once every match has finished, the tournament is finished.
fn complete_if_done(tournament: &mut Tournament) {
    if tournament.status == TournamentStatus::Active && tournament.all_matches_finished() {
        tournament.status = TournamentStatus::Finished;
    }
}
