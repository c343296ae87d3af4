//! Match between two teams of the same pool.

use crate::models::team::{PoolId, TeamId};
use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Progress of a single match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Scheduled, not yet started.
    #[default]
    Pending,
    /// In progress; live scores may be reported.
    Active,
    /// Played to a decisive result; scores and winner are final.
    Finished,
}

/// A single round-robin match: two distinct teams of the same pool.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub pool_id: PoolId,
    pub team_a: TeamId,
    pub team_b: TeamId,
    pub score_a: u32,
    pub score_b: u32,
    pub status: MatchStatus,
    /// Winning team; set only when finished (scores must differ).
    pub winner: Option<TeamId>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl GameMatch {
    /// Create a pending 0-0 match.
    pub fn new(
        tournament_id: TournamentId,
        pool_id: PoolId,
        team_a: TeamId,
        team_b: TeamId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            pool_id,
            team_a,
            team_b,
            score_a: 0,
            score_b: 0,
            status: MatchStatus::Pending,
            winner: None,
            start_time: None,
            end_time: None,
        }
    }

    /// True if the given team plays in this match.
    pub fn involves(&self, team_id: TeamId) -> bool {
        self.team_a == team_id || self.team_b == team_id
    }
}
