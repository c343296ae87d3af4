//! Single binary web server: tournament engine exposed as a REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use hoops_tournament_web::{
    finish_match, finish_tournament, form_pools, generate_schedule, pool_standings, report_score,
    start_match, PoolId, Tournament, TournamentError, TournamentId, TournamentSettings,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// Registry of live tournaments. Each entry carries its own lock so score
/// updates on one tournament never contend with another; the outer map is
/// write-locked only by create and cleanup.
#[derive(Default)]
struct Registry {
    tournaments: HashMap<TournamentId, Arc<RwLock<TournamentEntry>>>,
    /// Share token -> tournament id. Tokens are unique by construction.
    by_token: HashMap<String, TournamentId>,
}

type AppState = Data<RwLock<Registry>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Tournament plus the derived counts clients show on dashboards.
#[derive(serde::Serialize)]
struct TournamentOverview<'a> {
    #[serde(flatten)]
    tournament: &'a Tournament,
    total_players: usize,
    total_teams: usize,
    total_matches: usize,
    completed_matches: usize,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    location: String,
    date: DateTime<Utc>,
    organizer: String,
    #[serde(default)]
    settings: TournamentSettings,
}

#[derive(Deserialize)]
struct JoinBody {
    name: String,
    contact: Option<String>,
}

#[derive(Deserialize)]
struct ScoreBody {
    score_a: i64,
    score_b: i64,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segment: share token (e.g. /api/tournaments/share/{token})
#[derive(Deserialize)]
struct ShareTokenPath {
    token: String,
}

/// Path segments: tournament id and player id.
#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: TournamentId,
    player_id: Uuid,
}

/// Path segments: tournament id and match id.
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: Uuid,
}

/// Path segments: tournament id and pool index.
#[derive(Deserialize)]
struct TournamentPoolPath {
    id: TournamentId,
    pool_id: PoolId,
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn no_tournament() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

/// Map an engine error to an HTTP response: missing entities are 404, the
/// rest are 400 with the error's display text.
fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::PlayerNotFound(_)
        | TournamentError::MatchNotFound(_)
        | TournamentError::PoolNotFound(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn overview_json(t: &Tournament) -> HttpResponse {
    HttpResponse::Ok().json(TournamentOverview {
        tournament: t,
        total_players: t.players.len(),
        total_teams: t.teams.len(),
        total_matches: t.matches.len(),
        completed_matches: t.completed_matches(),
    })
}

/// Fetch a tournament entry by id without holding the registry lock afterwards.
fn lookup(state: &AppState, id: TournamentId) -> Result<Arc<RwLock<TournamentEntry>>, HttpResponse> {
    let g = state.read().map_err(|_| lock_error())?;
    g.tournaments.get(&id).cloned().ok_or_else(no_tournament)
}

/// Run `f` under the tournament's own write lock, refreshing last_activity.
fn with_tournament<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> HttpResponse,
{
    let entry = match lookup(state, id) {
        Ok(e) => e,
        Err(resp) => return resp,
    };
    let mut g = match entry.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.last_activity = Instant::now();
    f(&mut g.tournament)
}

/// Deserialize-side score check: the engine stores unsigned scores.
fn to_score(value: i64) -> Result<u32, TournamentError> {
    if value < 0 {
        return Err(TournamentError::InvalidInput {
            reason: "Scores cannot be negative",
        });
    }
    u32::try_from(value).map_err(|_| TournamentError::InvalidInput {
        reason: "Score out of range",
    })
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "hoops-tournament-web",
    })
}

/// Create a new tournament (returns it with id and share token).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let tournament = match Tournament::new(
        body.name,
        body.location,
        body.date,
        body.organizer,
        body.settings,
    ) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    let id = tournament.id;
    let token = tournament.share_token.clone();
    let resp = overview_json(&tournament);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.by_token.insert(token, id);
    g.tournaments.insert(
        id,
        Arc::new(RwLock::new(TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        })),
    );
    resp
}

/// Get a tournament by share token (404 if unknown).
/// Registered before the by-id route so "share" is not parsed as an id.
#[get("/api/tournaments/share/{token}")]
async fn api_get_tournament_by_token(state: AppState, path: Path<ShareTokenPath>) -> HttpResponse {
    let id = {
        let g = match state.read() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        match g.by_token.get(&path.token) {
            Some(&id) => id,
            None => return no_tournament(),
        }
    };
    with_tournament(&state, id, |t| overview_json(t))
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| overview_json(t))
}

/// Join a tournament (roster must still be open, i.e. status = setup).
#[post("/api/tournaments/{id}/players")]
async fn api_join(state: AppState, path: Path<TournamentPath>, body: Json<JoinBody>) -> HttpResponse {
    let body = body.into_inner();
    with_tournament(&state, path.id, move |t| {
        match t.add_player(body.name, body.contact) {
            Ok(_) => overview_json(t),
            Err(e) => error_response(&e),
        }
    })
}

/// List the roster.
#[get("/api/tournaments/{id}/players")]
async fn api_list_players(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(&t.players))
}

/// Remove a player by id (only while the roster is open).
#[delete("/api/tournaments/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match t.remove_player(path.player_id) {
        Ok(()) => overview_json(t),
        Err(e) => error_response(&e),
    })
}

/// List the teams (empty until pools are formed).
#[get("/api/tournaments/{id}/teams")]
async fn api_list_teams(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(&t.teams))
}

/// List all matches (empty until the schedule is generated).
#[get("/api/tournaments/{id}/matches")]
async fn api_list_matches(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(&t.matches))
}

/// Partition the roster into teams and pools (setup -> pools).
#[post("/api/tournaments/{id}/create-pools")]
async fn api_create_pools(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match form_pools(t) {
        Ok(()) => overview_json(t),
        Err(e) => error_response(&e),
    })
}

/// Generate the round-robin schedule (pools -> active).
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match generate_schedule(t) {
        Ok(()) => overview_json(t),
        Err(e) => error_response(&e),
    })
}

/// Close the tournament explicitly once every match is finished.
#[post("/api/tournaments/{id}/finish")]
async fn api_finish_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match finish_tournament(t) {
        Ok(()) => overview_json(t),
        Err(e) => error_response(&e),
    })
}

/// Start a pending match.
#[post("/api/tournaments/{id}/matches/{match_id}/start")]
async fn api_start_match(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match start_match(t, path.match_id) {
        Ok(()) => overview_json(t),
        Err(e) => error_response(&e),
    })
}

/// Report a live score for an active match (repeatable; last call wins).
#[put("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_report_score(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let (score_a, score_b) = match (to_score(body.score_a), to_score(body.score_b)) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(e), _) | (_, Err(e)) => return error_response(&e),
    };
    with_tournament(&state, path.id, |t| {
        match report_score(t, path.match_id, score_a, score_b) {
            Ok(()) => overview_json(t),
            Err(e) => error_response(&e),
        }
    })
}

/// Finish an active match with a decisive final score.
#[post("/api/tournaments/{id}/matches/{match_id}/finish")]
async fn api_finish_match(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let (score_a, score_b) = match (to_score(body.score_a), to_score(body.score_b)) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(e), _) | (_, Err(e)) => return error_response(&e),
    };
    with_tournament(&state, path.id, |t| {
        match finish_match(t, path.match_id, score_a, score_b) {
            Ok(()) => overview_json(t),
            Err(e) => error_response(&e),
        }
    })
}

/// Current standings of one pool, recomputed from its finished matches.
#[get("/api/tournaments/{id}/pools/{pool_id}/standings")]
async fn api_pool_standings(state: AppState, path: Path<TournamentPoolPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        match pool_standings(t, path.pool_id) {
            Ok(rows) => HttpResponse::Ok().json(rows),
            Err(e) => error_response(&e),
        }
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(Registry::default()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let registry = &mut *g;
            let before = registry.tournaments.len();
            registry.tournaments.retain(|_, entry| match entry.read() {
                Ok(e) => e.last_activity.elapsed() < INACTIVITY_TIMEOUT,
                Err(_) => false,
            });
            let removed = before - registry.tournaments.len();
            if removed > 0 {
                let tournaments = &registry.tournaments;
                registry.by_token.retain(|_, id| tournaments.contains_key(id));
                log::info!(
                    "Cleaned up {} inactive tournament(s) (no activity for 12h)",
                    removed
                );
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament_by_token)
            .service(api_get_tournament)
            .service(api_join)
            .service(api_list_players)
            .service(api_remove_player)
            .service(api_list_teams)
            .service(api_list_matches)
            .service(api_create_pools)
            .service(api_start_tournament)
            .service(api_finish_tournament)
            .service(api_start_match)
            .service(api_report_score)
            .service(api_finish_match)
            .service(api_pool_standings)
    })
    .bind(bind)?
    .run()
    .await
}
