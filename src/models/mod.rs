//! Data structures for the tournament: players, teams, matches, tournament state.

mod game;
mod player;
mod team;
mod tournament;

pub use game::{GameMatch, MatchId, MatchStatus};
pub use player::{Player, PlayerId};
pub use team::{PoolId, Team, TeamId};
pub use tournament::{
    Tournament, TournamentError, TournamentId, TournamentSettings, TournamentStatus,
};
