//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_files::Files;
use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post, put,
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use poke_league_web::bridge::SaveBridge;
use poke_league_web::league::{Division, LeagueState};
use poke_league_web::registry::Registry;
use poke_league_web::saves;
use poke_league_web::shop::{self, PurchaseLedger};
use poke_league_web::storage::SettingsStore;
use poke_league_web::{
    advance_round, clear_score, create_bracket, finalize_round, generate_pairings,
    record_final_winner, record_semifinal_winners, report_score, set_pair_winner, Bracket,
    BracketId, SwissConfig, SwissTournament, TournamentError, TournamentId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Per-tournament entry: state + last activity time (for auto-cleanup).
struct SwissEntry {
    tournament: SwissTournament,
    last_activity: Instant,
}

struct BracketEntry {
    bracket: Bracket,
    last_activity: Instant,
}

/// In-memory app state. Tournaments and brackets live per organizer
/// session and are evicted after long inactivity; the league table and
/// purchase ledger persist through the settings store.
struct AppState {
    tournaments: RwLock<HashMap<TournamentId, SwissEntry>>,
    brackets: RwLock<HashMap<BracketId, BracketEntry>>,
    league: RwLock<LeagueState>,
    ledger: RwLock<PurchaseLedger>,
    bridge: RwLock<Option<Arc<SaveBridge>>>,
    registry: Registry,
    store: SettingsStore,
}

type State = Data<AppState>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn not_found(what: &str) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": format!("No {}", what) }))
}

fn bad_request(e: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Run one operation against a stored Swiss tournament and answer with the
/// updated state (or the operation's error).
fn with_swiss<F>(state: &State, id: TournamentId, op: F) -> HttpResponse
where
    F: FnOnce(&mut SwissTournament) -> Result<(), TournamentError>,
{
    let mut g = match state.tournaments.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found("tournament"),
    };
    entry.last_activity = Instant::now();
    match op(&mut entry.tournament) {
        Ok(()) => HttpResponse::Ok().json(&entry.tournament),
        Err(e) => bad_request(e),
    }
}

fn with_bracket<F>(state: &State, id: BracketId, op: F) -> HttpResponse
where
    F: FnOnce(&mut Bracket) -> Result<(), TournamentError>,
{
    let mut g = match state.brackets.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found("bracket"),
    };
    entry.last_activity = Instant::now();
    match op(&mut entry.bracket) {
        Ok(()) => HttpResponse::Ok().json(&entry.bracket),
        Err(e) => bad_request(e),
    }
}

fn session_user(session: &Session) -> Option<String> {
    session.get::<String>("user").ok().flatten()
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct LoginBody {
    name: String,
    access_code: String,
}

#[derive(Deserialize)]
struct CreateSwissBody {
    /// Defaults to the full registry roster.
    players: Option<Vec<String>>,
    max_rounds: Option<u32>,
}

#[derive(Deserialize)]
struct PairWinnerBody {
    index: usize,
    winner: String,
}

#[derive(Deserialize)]
struct SemiWinnersBody {
    winners: [String; 2],
}

#[derive(Deserialize)]
struct ChampionBody {
    champion: String,
}

#[derive(Deserialize)]
struct SetRecordBody {
    player: String,
    wins: u32,
    losses: u32,
}

#[derive(Deserialize)]
struct ManualPairingsBody {
    pairs: Vec<(String, String)>,
    bye: Option<String>,
}

#[derive(Deserialize)]
struct CreateBracketBody {
    players: Option<Vec<String>>,
    #[serde(default = "default_shuffle")]
    shuffle: bool,
}

fn default_shuffle() -> bool {
    true
}

#[derive(Deserialize)]
struct ScoreBody {
    match_index: usize,
    score_a: u32,
    score_b: u32,
}

#[derive(Deserialize)]
struct ClearScoreBody {
    match_index: usize,
}

#[derive(Deserialize)]
struct LeagueWinnerBody {
    division: Division,
    index: usize,
    winner: String,
}

#[derive(Deserialize)]
struct PurchaseBody {
    item: String,
}

#[derive(Deserialize)]
struct BridgeLoadBody {
    path: String,
}

#[derive(Deserialize)]
struct BridgeOpenQuery {
    save: String,
    mode: Option<String>,
}

#[derive(Deserialize)]
struct BridgeBoxQuery {
    save: String,
    #[serde(rename = "box")]
    box_index: u32,
    mode: Option<String>,
}

/// Path segment: tournament/bracket id (e.g. /api/swiss/{id})
#[derive(Deserialize)]
struct IdPath {
    id: uuid::Uuid,
}

#[derive(Deserialize)]
struct UserPath {
    user: String,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "poke-league-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

// ---------- session ----------

/// Log a trainer in against the registry; the name lives in the cookie session.
#[post("/api/login")]
async fn api_login(state: State, session: Session, body: Json<LoginBody>) -> HttpResponse {
    if !state.registry.verify(&body.name, &body.access_code) {
        return HttpResponse::Unauthorized()
            .json(serde_json::json!({ "error": "Unknown trainer or wrong access code" }));
    }
    if session.insert("user", body.name.clone()).is_err() {
        return HttpResponse::InternalServerError().body("session error");
    }
    HttpResponse::Ok().json(serde_json::json!({ "user": body.name }))
}

#[post("/api/logout")]
async fn api_logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().json(serde_json::json!({ "user": null }))
}

#[get("/api/session")]
async fn api_session(session: Session) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "user": session_user(&session) }))
}

// ---------- Swiss tournament ----------

/// Create a Swiss tournament (returns it with id; client stores the id).
#[post("/api/swiss")]
async fn api_create_swiss(state: State, body: Option<Json<CreateSwissBody>>) -> HttpResponse {
    let body = body.map(|b| b.into_inner());
    let players = body
        .as_ref()
        .and_then(|b| b.players.clone())
        .unwrap_or_else(|| state.registry.names());
    let config = SwissConfig {
        max_rounds: body
            .as_ref()
            .and_then(|b| b.max_rounds)
            .unwrap_or_else(|| SwissConfig::default().max_rounds),
        ..SwissConfig::default()
    };
    let tournament = match SwissTournament::new(players, config) {
        Ok(t) => t,
        Err(e) => return bad_request(e),
    };
    let id = tournament.id;
    let mut g = match state.tournaments.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.insert(
        id,
        SwissEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    match g.get(&id) {
        Some(entry) => HttpResponse::Ok().json(&entry.tournament),
        None => lock_error(),
    }
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/swiss/{id}")]
async fn api_get_swiss(state: State, path: Path<IdPath>) -> HttpResponse {
    with_swiss(&state, path.id, |_| Ok(()))
}

/// Generate the current round's pairings (no round may be open).
#[post("/api/swiss/{id}/pairings")]
async fn api_swiss_generate(state: State, path: Path<IdPath>) -> HttpResponse {
    with_swiss(&state, path.id, |t| {
        generate_pairings(t, &mut rand::thread_rng())
    })
}

/// Record the winner of one open pairing.
#[put("/api/swiss/{id}/pairings/winner")]
async fn api_swiss_set_winner(
    state: State,
    path: Path<IdPath>,
    body: Json<PairWinnerBody>,
) -> HttpResponse {
    let body = body.into_inner();
    with_swiss(&state, path.id, |t| {
        set_pair_winner(t, body.index, body.winner)
    })
}

/// Commit the round once every pairing has a winner.
#[post("/api/swiss/{id}/finalize")]
async fn api_swiss_finalize(state: State, path: Path<IdPath>) -> HttpResponse {
    with_swiss(&state, path.id, finalize_round)
}

/// Standings sorted by (wins, Buchholz, name).
#[get("/api/swiss/{id}/standings")]
async fn api_swiss_standings(state: State, path: Path<IdPath>) -> HttpResponse {
    let mut g = match state.tournaments.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found("tournament"),
    };
    entry.last_activity = Instant::now();
    HttpResponse::Ok().json(entry.tournament.standings())
}

/// Record both semifinal winners of the top cut.
#[post("/api/swiss/{id}/topcut/semis")]
async fn api_swiss_topcut_semis(
    state: State,
    path: Path<IdPath>,
    body: Json<SemiWinnersBody>,
) -> HttpResponse {
    let [first, second] = body.into_inner().winners;
    with_swiss(&state, path.id, |t| {
        record_semifinal_winners(t, first, second)
    })
}

/// Record the top-cut final's winner: the champion.
#[post("/api/swiss/{id}/topcut/final")]
async fn api_swiss_topcut_final(
    state: State,
    path: Path<IdPath>,
    body: Json<ChampionBody>,
) -> HttpResponse {
    let body = body.into_inner();
    with_swiss(&state, path.id, |t| record_final_winner(t, body.champion))
}

/// Admin override: set a player's record directly.
#[put("/api/swiss/{id}/record")]
async fn api_swiss_set_record(
    state: State,
    path: Path<IdPath>,
    body: Json<SetRecordBody>,
) -> HttpResponse {
    let body = body.into_inner();
    with_swiss(&state, path.id, |t| {
        t.set_record(&body.player, body.wins, body.losses)
    })
}

/// Admin override: replace the open round's pairings by hand.
#[put("/api/swiss/{id}/pairings")]
async fn api_swiss_manual_pairings(
    state: State,
    path: Path<IdPath>,
    body: Json<ManualPairingsBody>,
) -> HttpResponse {
    let body = body.into_inner();
    with_swiss(&state, path.id, |t| {
        t.set_manual_pairings(body.pairs, body.bye)
    })
}

/// Drop all tournament state, keeping the roster.
#[post("/api/swiss/{id}/reset")]
async fn api_swiss_reset(state: State, path: Path<IdPath>) -> HttpResponse {
    with_swiss(&state, path.id, |t| {
        t.reset();
        Ok(())
    })
}

// ---------- single-elimination bracket ----------

/// Create a bracket (needs at least 2 entrants; shuffle on by default).
#[post("/api/brackets")]
async fn api_create_bracket(state: State, body: Option<Json<CreateBracketBody>>) -> HttpResponse {
    let body = body.map(|b| b.into_inner());
    let players = body
        .as_ref()
        .and_then(|b| b.players.clone())
        .unwrap_or_else(|| state.registry.names());
    let shuffle = body.map(|b| b.shuffle).unwrap_or(true);
    let bracket = match create_bracket(players, shuffle, &mut rand::thread_rng()) {
        Ok(b) => b,
        Err(e) => return bad_request(e),
    };
    let id = bracket.id;
    let mut g = match state.brackets.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.insert(
        id,
        BracketEntry {
            bracket,
            last_activity: Instant::now(),
        },
    );
    match g.get(&id) {
        Some(entry) => HttpResponse::Ok().json(&entry.bracket),
        None => lock_error(),
    }
}

#[get("/api/brackets/{id}")]
async fn api_get_bracket(state: State, path: Path<IdPath>) -> HttpResponse {
    with_bracket(&state, path.id, |_| Ok(()))
}

/// Report a score ("X-Y"; ties rejected) for a current-round match.
#[put("/api/brackets/{id}/score")]
async fn api_bracket_score(
    state: State,
    path: Path<IdPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let body = body.into_inner();
    with_bracket(&state, path.id, |b| {
        report_score(b, body.match_index, body.score_a, body.score_b)
    })
}

/// Clear a reported score while the round is still open.
#[delete("/api/brackets/{id}/score")]
async fn api_bracket_clear_score(
    state: State,
    path: Path<IdPath>,
    body: Json<ClearScoreBody>,
) -> HttpResponse {
    let body = body.into_inner();
    with_bracket(&state, path.id, |b| clear_score(b, body.match_index))
}

/// Close the round and advance the winners.
#[post("/api/brackets/{id}/advance")]
async fn api_bracket_advance(state: State, path: Path<IdPath>) -> HttpResponse {
    with_bracket(&state, path.id, advance_round)
}

// ---------- league table ----------

#[get("/api/league")]
async fn api_get_league(state: State) -> HttpResponse {
    let g = match state.league.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(&*g)
}

/// Open the current split for result edits.
#[post("/api/league/split/open")]
async fn api_league_open(state: State) -> HttpResponse {
    let mut g = match state.league.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.open_split() {
        Ok(()) => {
            persist_league(&state, &g);
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => bad_request(e),
    }
}

/// Discard the open split without saving any result.
#[post("/api/league/split/cancel")]
async fn api_league_cancel(state: State) -> HttpResponse {
    let mut g = match state.league.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.cancel_split() {
        Ok(()) => {
            persist_league(&state, &g);
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => bad_request(e),
    }
}

/// Record the winner of one division fixture.
#[put("/api/league/matches")]
async fn api_league_set_winner(state: State, body: Json<LeagueWinnerBody>) -> HttpResponse {
    let body = body.into_inner();
    let mut g = match state.league.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.set_winner(body.division, body.index, body.winner) {
        Ok(()) => {
            persist_league(&state, &g);
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => bad_request(e),
    }
}

/// Close the split: rankings, promotion/relegation, consolation wildcard.
#[post("/api/league/split/finalize")]
async fn api_league_finalize(state: State) -> HttpResponse {
    let mut g = match state.league.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let outcome = match g.finalize_split(&HashMap::new()) {
        Ok(outcome) => outcome,
        Err(e) => return bad_request(e),
    };
    persist_league(&state, &g);
    if let Some(user) = &outcome.wildcard {
        let mut ledger = match state.ledger.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        shop::grant(&mut ledger, user, shop::CONSOLATION_ITEM);
        if let Err(e) = ledger.save(&state.store) {
            log::warn!("could not persist purchase ledger: {}", e);
        }
        log::info!("consolation wildcard granted to {}", user);
    }
    HttpResponse::Ok().json(outcome)
}

/// The general table (season points, penalties not yet wired in).
#[get("/api/league/table")]
async fn api_league_table(state: State) -> HttpResponse {
    let g = match state.league.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let table = g.general_table(&state.registry.names(), &HashMap::new());
    HttpResponse::Ok().json(table)
}

/// Wipe the league back to a fresh season.
#[post("/api/league/reset")]
async fn api_league_reset(state: State) -> HttpResponse {
    let mut g = match state.league.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.reset(&state.registry.names());
    persist_league(&state, &g);
    let mut ledger = match state.ledger.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    ledger.clear();
    if let Err(e) = ledger.save(&state.store) {
        log::warn!("could not persist purchase ledger: {}", e);
    }
    HttpResponse::Ok().json(&*g)
}

fn persist_league(state: &State, league: &LeagueState) {
    if let Err(e) = league.save(&state.store) {
        log::warn!("could not persist league state: {}", e);
    }
}

// ---------- shop ----------

#[get("/api/shop/catalog")]
async fn api_shop_catalog() -> HttpResponse {
    HttpResponse::Ok().json(shop::catalog())
}

#[get("/api/shop/balance/{user}")]
async fn api_shop_balance(state: State, path: Path<UserPath>) -> HttpResponse {
    let league = match state.league.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let ledger = match state.ledger.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(serde_json::json!({
        "user": path.user,
        "earned": shop::coins_from_league(&league, &path.user),
        "spent": ledger.total_spent(&path.user),
        "available": shop::balance(&league, &ledger, &path.user),
    }))
}

/// Buy an item for the logged-in trainer.
#[post("/api/shop/purchase")]
async fn api_shop_purchase(
    state: State,
    session: Session,
    body: Json<PurchaseBody>,
) -> HttpResponse {
    let user = match session_user(&session) {
        Some(user) => user,
        None => {
            return HttpResponse::Unauthorized()
                .json(serde_json::json!({ "error": "Log in to buy items" }))
        }
    };
    let league = match state.league.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let mut ledger = match state.ledger.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match shop::purchase(&league, &mut ledger, &user, &body.item) {
        Ok(purchase) => {
            if let Err(e) = ledger.save(&state.store) {
                log::warn!("could not persist purchase ledger: {}", e);
            }
            HttpResponse::Ok().json(purchase)
        }
        Err(e) => bad_request(e),
    }
}

#[get("/api/shop/purchases/{user}")]
async fn api_shop_purchases(state: State, path: Path<UserPath>) -> HttpResponse {
    let ledger = match state.ledger.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(ledger.for_user(&path.user))
}

// ---------- saves and bridge ----------

/// The trainer's uploaded saves, newest first.
#[get("/api/saves/{user}")]
async fn api_list_saves(path: Path<UserPath>) -> HttpResponse {
    match saves::list_user_saves(&saves::saves_root(), &path.user) {
        Ok(files) => HttpResponse::Ok().json(files),
        Err(e) => bad_request(e),
    }
}

/// Point the app at the save-bridge binary (clears any previous handle).
#[post("/api/bridge/load")]
async fn api_bridge_load(state: State, body: Json<BridgeLoadBody>) -> HttpResponse {
    let bridge = match SaveBridge::load(&body.path) {
        Ok(b) => Arc::new(b),
        Err(e) => return bad_request(e),
    };
    let exe = bridge.exe_path().display().to_string();
    let mut g = match state.bridge.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    *g = Some(bridge);
    HttpResponse::Ok().json(serde_json::json!({ "loaded": exe }))
}

fn loaded_bridge(state: &State) -> Result<Arc<SaveBridge>, HttpResponse> {
    let g = state.bridge.read().map_err(|_| lock_error())?;
    g.clone().ok_or_else(|| {
        bad_request("Bridge not loaded; point /api/bridge/load at the binary first")
    })
}

/// General save data (trainer, party) via the bridge.
#[get("/api/bridge/save")]
async fn api_bridge_open(state: State, query: Query<BridgeOpenQuery>) -> HttpResponse {
    let bridge = match loaded_bridge(&state) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    match bridge.open_save(&query.save, query.mode.as_deref()).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(e) => bad_request(e),
    }
}

/// One storage box via the bridge (cached per save/box/mode).
#[get("/api/bridge/box")]
async fn api_bridge_box(state: State, query: Query<BridgeBoxQuery>) -> HttpResponse {
    let bridge = match loaded_bridge(&state) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    match bridge
        .read_box(&query.save, query.box_index, query.mode.as_deref())
        .await
    {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(e) => bad_request(e),
    }
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

    let registry = Registry::from_env_or_builtin();
    let store = SettingsStore::open_default();
    let league = LeagueState::load(&store, &registry.names());
    let ledger = PurchaseLedger::load(&store);
    let state = Data::new(AppState {
        tournaments: RwLock::new(HashMap::new()),
        brackets: RwLock::new(HashMap::new()),
        league: RwLock::new(league),
        ledger: RwLock::new(ledger),
        bridge: RwLock::new(None),
        registry,
        store,
    });

    // Background task: every 30 minutes, remove tournaments and brackets
    // inactive for 12+ hours.
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut removed = 0;
            if let Ok(mut g) = state_cleanup.tournaments.write() {
                let before = g.len();
                g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
                removed += before - g.len();
            }
            if let Ok(mut g) = state_cleanup.brackets.write() {
                let before = g.len();
                g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
                removed += before - g.len();
            }
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    let session_key = Key::generate();

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                session_key.clone(),
            ))
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_login)
            .service(api_logout)
            .service(api_session)
            .service(api_create_swiss)
            .service(api_get_swiss)
            .service(api_swiss_generate)
            .service(api_swiss_set_winner)
            .service(api_swiss_finalize)
            .service(api_swiss_standings)
            .service(api_swiss_topcut_semis)
            .service(api_swiss_topcut_final)
            .service(api_swiss_set_record)
            .service(api_swiss_manual_pairings)
            .service(api_swiss_reset)
            .service(api_create_bracket)
            .service(api_get_bracket)
            .service(api_bracket_score)
            .service(api_bracket_clear_score)
            .service(api_bracket_advance)
            .service(api_get_league)
            .service(api_league_open)
            .service(api_league_cancel)
            .service(api_league_set_winner)
            .service(api_league_finalize)
            .service(api_league_table)
            .service(api_league_reset)
            .service(api_shop_catalog)
            .service(api_shop_balance)
            .service(api_shop_purchase)
            .service(api_shop_purchases)
            .service(api_list_saves)
            .service(api_bridge_load)
            .service(api_bridge_open)
            .service(api_bridge_box)
            .service(Files::new("/static", "static").show_files_listing())
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
