//! Player data structures.

use crate::models::team::TeamId;
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in team rosters and lookups).
pub type PlayerId = Uuid;

/// A player registered in a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub tournament_id: TournamentId,
    pub name: String,
    /// Optional contact string (phone or email) for the organizer.
    pub contact: Option<String>,
    /// Assigned team; absent until pools are formed.
    pub team_id: Option<TeamId>,
}

impl Player {
    /// Create a new unassigned player for the given tournament.
    pub fn new(
        tournament_id: TournamentId,
        name: impl Into<String>,
        contact: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            name: name.into(),
            contact,
            team_id: None,
        }
    }
}
