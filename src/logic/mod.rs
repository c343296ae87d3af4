//! Tournament engine: pool formation, scheduling, scoring, standings.

mod pools;
mod schedule;
mod scoring;
mod standings;

pub use pools::form_pools;
pub use schedule::generate_schedule;
pub use scoring::{finish_match, finish_tournament, report_score, start_match};
pub use standings::{pool_standings, TeamStanding};
