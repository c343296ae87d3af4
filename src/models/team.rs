//! Team: a fixed group of players competing in one pool.

use crate::models::player::PlayerId;
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// Pool index within a tournament. Pool 0 is filled first; a pool is the set
/// of teams sharing an index, not a persisted entity of its own.
pub type PoolId = u32;

/// A team formed from consecutive roster entries. Membership is fixed once created.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub tournament_id: TournamentId,
    pub pool_id: PoolId,
    pub name: String,
    /// Player ids in join order; length equals settings.players_per_team.
    pub players: Vec<PlayerId>,
}

impl Team {
    pub fn new(
        tournament_id: TournamentId,
        pool_id: PoolId,
        name: impl Into<String>,
        players: Vec<PlayerId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            pool_id,
            name: name.into(),
            players,
        }
    }
}
