//! Basketball tournament web app: library with models and engine logic.

pub mod logic;
pub mod models;

pub use logic::{
    finish_match, finish_tournament, form_pools, generate_schedule, pool_standings, report_score,
    start_match, TeamStanding,
};
pub use models::{
    GameMatch, MatchId, MatchStatus, Player, PlayerId, PoolId, Team, TeamId, Tournament,
    TournamentError, TournamentId, TournamentSettings, TournamentStatus,
};
