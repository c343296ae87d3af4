//! Tournament, its settings, lifecycle status, and errors.

use crate::models::game::{GameMatch, MatchId, MatchStatus};
use crate::models::player::{Player, PlayerId};
use crate::models::team::{PoolId, Team, TeamId};
use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Operation is not legal in the current tournament or match status.
    InvalidTransition,
    /// A transition guard was not met (e.g. too few players, unfinished matches).
    PreconditionFailed { reason: &'static str },
    /// Roster cannot be partitioned into full teams, or too few teams result.
    InsufficientPlayers { players: usize, players_per_team: u32 },
    /// Malformed or out-of-range field or score.
    InvalidInput { reason: &'static str },
    /// Finish attempted with equal scores; a decisive winner is required.
    TiedScore { score: u32 },
    /// Player not found in this tournament.
    PlayerNotFound(PlayerId),
    /// Match not found in this tournament.
    MatchNotFound(MatchId),
    /// No pool with this index exists.
    PoolNotFound(PoolId),
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidTransition => write!(f, "Invalid state for this action"),
            TournamentError::PreconditionFailed { reason } => write!(f, "{}", reason),
            TournamentError::InsufficientPlayers {
                players,
                players_per_team,
            } => write!(
                f,
                "Cannot form full teams of {} from {} players",
                players_per_team, players
            ),
            TournamentError::InvalidInput { reason } => write!(f, "{}", reason),
            TournamentError::TiedScore { score } => {
                write!(f, "Match cannot finish tied at {}-{}", score, score)
            }
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::PoolNotFound(pool_id) => write!(f, "No pool with index {}", pool_id),
            TournamentError::DuplicatePlayerName => {
                write!(f, "A player with this name already exists")
            }
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Lifecycle phase of the tournament. Advances forward only, never regresses.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Roster open: players may join or be removed; no teams or matches yet.
    #[default]
    Setup,
    /// Teams and pools formed; roster closed; no matches yet.
    Pools,
    /// Schedule generated; scores may be reported.
    Active,
    /// All matches decided (or organizer closed it); no further changes.
    Finished,
}

/// Organizer-chosen settings, fixed at creation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentSettings {
    /// Maximum teams per pool. Pools fill in order; the last may be smaller.
    pub teams_per_pool: u32,
    /// Exact team size; the roster must divide evenly into teams.
    pub players_per_team: u32,
    /// Target score the winner must reach for a match to finish.
    pub score_limit: u32,
    /// Optional match clock in minutes. Stored for display; not enforced.
    pub time_limit: Option<u32>,
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            teams_per_pool: 4,
            players_per_team: 2,
            score_limit: 21,
            time_limit: None,
        }
    }
}

impl TournamentSettings {
    /// Check field ranges. Called once at tournament creation.
    pub fn validate(&self) -> Result<(), TournamentError> {
        if self.teams_per_pool < 2 {
            return Err(TournamentError::InvalidInput {
                reason: "teams_per_pool must be at least 2",
            });
        }
        if self.players_per_team == 0 {
            return Err(TournamentError::InvalidInput {
                reason: "players_per_team must be at least 1",
            });
        }
        if self.score_limit == 0 {
            return Err(TournamentError::InvalidInput {
                reason: "score_limit must be greater than zero",
            });
        }
        if self.time_limit == Some(0) {
            return Err(TournamentError::InvalidInput {
                reason: "time_limit must be greater than zero",
            });
        }
        Ok(())
    }
}

/// Length of the share token in alphanumeric characters.
const SHARE_TOKEN_LEN: usize = 22;

/// Full tournament state: roster, teams, matches, and lifecycle status.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub location: String,
    /// Scheduled start of the event.
    pub date: DateTime<Utc>,
    pub organizer: String,
    /// Opaque token granting join access without authentication.
    pub share_token: String,
    pub settings: TournamentSettings,
    pub status: TournamentStatus,
    /// Registered players in join order.
    pub players: Vec<Player>,
    /// Teams in creation order (empty until pools are formed).
    pub teams: Vec<Team>,
    /// All matches across pools (empty until the schedule is generated).
    pub matches: Vec<GameMatch>,
}

impl Tournament {
    /// Minimum roster size to form pools (one pool of two two-player teams).
    pub const MIN_PLAYERS: usize = 4;

    /// Create a tournament in Setup with a fresh share token. Validates settings.
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        date: DateTime<Utc>,
        organizer: impl Into<String>,
        settings: TournamentSettings,
    ) -> Result<Self, TournamentError> {
        settings.validate()?;
        let name = name.into();
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(TournamentError::InvalidInput {
                reason: "Tournament name must not be empty",
            });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            location: location.into(),
            date,
            organizer: organizer.into(),
            share_token: generate_share_token(),
            settings,
            status: TournamentStatus::Setup,
            players: Vec::new(),
            teams: Vec::new(),
            matches: Vec::new(),
        })
    }

    /// Add a player to the roster (Setup only). Names must be unique (case-insensitive).
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        contact: Option<String>,
    ) -> Result<PlayerId, TournamentError> {
        if self.status != TournamentStatus::Setup {
            return Err(TournamentError::InvalidTransition);
        }
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::InvalidInput {
                reason: "Player name must not be empty",
            });
        }
        let is_duplicate = self
            .players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicatePlayerName);
        }
        let player = Player::new(self.id, name_trimmed, contact);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Remove a player by id (only valid in Setup).
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::Setup {
            return Err(TournamentError::InvalidTransition);
        }
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        self.players.remove(idx);
        Ok(())
    }

    /// Look up a team by id.
    pub fn team(&self, team_id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    /// Teams of one pool, in creation order.
    pub fn pool_teams(&self, pool_id: PoolId) -> Vec<&Team> {
        self.teams.iter().filter(|t| t.pool_id == pool_id).collect()
    }

    /// Number of pools (0 until pools are formed).
    pub fn pool_count(&self) -> u32 {
        self.teams.iter().map(|t| t.pool_id + 1).max().unwrap_or(0)
    }

    /// Mutable match lookup by id.
    pub fn match_mut(&mut self, match_id: MatchId) -> Result<&mut GameMatch, TournamentError> {
        self.matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))
    }

    /// Matches with a decisive result so far.
    pub fn completed_matches(&self) -> usize {
        self.matches
            .iter()
            .filter(|m| m.status == MatchStatus::Finished)
            .count()
    }

    /// True once every generated match has finished.
    pub fn all_matches_finished(&self) -> bool {
        !self.matches.is_empty() && self.matches.iter().all(|m| m.status == MatchStatus::Finished)
    }
}

/// Generate an unguessable share token from the thread-local CSPRNG.
fn generate_share_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SHARE_TOKEN_LEN)
        .map(char::from)
        .collect()
}
