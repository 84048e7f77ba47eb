//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use lucky_draw_web::{
    add_from_rows, add_from_text, dedupe_by_name, detect_duplicates, draw, export_filename,
    export_groups_csv, generate_groups, preview_candidate, reset_winners, DrawSession, SessionId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Per-session entry: session data + last activity time (for auto-cleanup).
struct SessionEntry {
    session: DrawSession,
    last_activity: Instant,
}

/// In-memory state: many draw sessions by ID. Entries are removed after inactivity.
type AppState = Data<RwLock<HashMap<SessionId, SessionEntry>>>;

/// Inactivity threshold: sessions not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Session as the client sees it: full state plus the computed duplicate-name
/// set (sorted for stable rendering).
#[derive(Serialize)]
struct SessionView<'a> {
    #[serde(flatten)]
    session: &'a DrawSession,
    duplicate_names: Vec<String>,
}

fn session_view(session: &DrawSession) -> SessionView<'_> {
    let mut duplicate_names: Vec<String> = detect_duplicates(session).into_iter().collect();
    duplicate_names.sort();
    SessionView {
        session,
        duplicate_names,
    }
}

#[derive(Deserialize)]
struct CreateSessionBody {
    #[serde(default)]
    allow_repeat: bool,
}

#[derive(Deserialize)]
struct AddParticipantsBody {
    text: String,
}

#[derive(Deserialize)]
struct ImportCsvBody {
    csv: String,
}

#[derive(Deserialize)]
struct SettingsBody {
    allow_repeat: bool,
}

#[derive(Deserialize)]
struct GenerateGroupsBody {
    size: usize,
}

/// Path segment: session id (e.g. /api/sessions/{id})
#[derive(Deserialize)]
struct SessionPath {
    id: SessionId,
}

/// Path segments: session id and participant id.
#[derive(Deserialize)]
struct SessionParticipantPath {
    id: SessionId,
    participant_id: Uuid,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "lucky-draw-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new session (returns it with id; client stores id for subsequent requests).
#[post("/api/sessions")]
async fn api_create_session(state: AppState, body: Option<Json<CreateSessionBody>>) -> HttpResponse {
    let allow_repeat = body.as_ref().map(|b| b.allow_repeat).unwrap_or(false);
    let session = DrawSession::new(allow_repeat);
    let id = session.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        SessionEntry {
            session,
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(session_view(&g.get(&id).unwrap().session))
}

/// Get a session by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/sessions/{id}")]
async fn api_get_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(session_view(&entry.session))
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    }
}

/// Add participants from pasted text (newline- or comma-separated names).
#[post("/api/sessions/{id}/participants")]
async fn api_add_participants(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<AddParticipantsBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let added = add_from_text(&mut entry.session, &body.text);
    log::info!("session {}: added {} participant(s) from text", path.id, added.len());
    HttpResponse::Ok().json(session_view(&entry.session))
}

/// Add participants from an uploaded CSV file's text. No header row is
/// assumed; every cell is treated as a name candidate.
#[post("/api/sessions/{id}/participants/import")]
async fn api_import_csv(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<ImportCsvBody>,
) -> HttpResponse {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.csv.as_bytes());
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        match record {
            Ok(r) => rows.push(r.iter().map(str::to_string).collect()),
            Err(e) => {
                return HttpResponse::BadRequest()
                    .json(serde_json::json!({ "error": format!("CSV parse error: {}", e) }))
            }
        }
    }

    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let added = add_from_rows(&mut entry.session, &rows);
    log::info!("session {}: imported {} participant(s) from CSV", path.id, added.len());
    HttpResponse::Ok().json(session_view(&entry.session))
}

/// Remove a participant by id. 200 even when the id is unknown (permissive no-op).
#[delete("/api/sessions/{id}/participants/{participant_id}")]
async fn api_remove_participant(state: AppState, path: Path<SessionParticipantPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    entry.session.remove_participant(path.participant_id);
    HttpResponse::Ok().json(session_view(&entry.session))
}

/// Remove all participants (also clears winners and groups).
#[delete("/api/sessions/{id}/participants")]
async fn api_clear_participants(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    entry.session.clear_all();
    HttpResponse::Ok().json(session_view(&entry.session))
}

/// Drop every duplicate name, keeping the first occurrence of each.
#[post("/api/sessions/{id}/participants/dedupe")]
async fn api_dedupe_participants(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    dedupe_by_name(&mut entry.session);
    HttpResponse::Ok().json(session_view(&entry.session))
}

/// Update session settings (repeat winning on/off).
#[put("/api/sessions/{id}/settings")]
async fn api_set_settings(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<SettingsBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    entry.session.set_allow_repeat(body.allow_repeat);
    HttpResponse::Ok().json(session_view(&entry.session))
}

/// Display-only sample for the countdown flicker. Commits nothing.
#[get("/api/sessions/{id}/draw/preview")]
async fn api_draw_preview(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    match preview_candidate(&entry.session) {
        Some(p) => HttpResponse::Ok().json(p),
        None => HttpResponse::BadRequest().json(serde_json::json!({
            "error": lucky_draw_web::SessionError::NoCandidates.to_string()
        })),
    }
}

/// Commit one draw: pick a winner from the eligible pool.
#[post("/api/sessions/{id}/draw")]
async fn api_draw(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    match draw(&mut entry.session) {
        Ok(winner) => {
            log::info!("session {}: drew winner {}", path.id, winner.name);
            HttpResponse::Ok().json(session_view(&entry.session))
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Clear the winner record (roster and groups untouched).
#[post("/api/sessions/{id}/winners/reset")]
async fn api_reset_winners(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    reset_winners(&mut entry.session);
    HttpResponse::Ok().json(session_view(&entry.session))
}

/// Shuffle the roster and partition it into groups of the requested size.
#[post("/api/sessions/{id}/groups")]
async fn api_generate_groups(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<GenerateGroupsBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    match generate_groups(&mut entry.session, body.size) {
        Ok(()) => HttpResponse::Ok().json(session_view(&entry.session)),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Download the current grouping as CSV (UTF-8 with BOM so spreadsheets
/// render CJK names correctly).
#[get("/api/sessions/{id}/groups/export")]
async fn api_export_groups(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    let payload = match export_groups_csv(&entry.session) {
        Ok(p) => p,
        Err(e) => {
            log::error!("session {}: CSV export failed: {}", path.id, e);
            return HttpResponse::InternalServerError().body("export error");
        }
    };
    let filename = export_filename(chrono::Local::now().date_naive());
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(payload)
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

    let state = Data::new(RwLock::new(HashMap::<SessionId, SessionEntry>::new()));

    // Background task: every 30 minutes, remove sessions inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive session(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_create_session)
            .service(api_get_session)
            .service(api_add_participants)
            .service(api_import_csv)
            .service(api_remove_participant)
            .service(api_clear_participants)
            .service(api_dedupe_participants)
            .service(api_set_settings)
            .service(api_draw_preview)
            .service(api_draw)
            .service(api_reset_winners)
            .service(api_generate_groups)
            .service(api_export_groups)
            .service(Files::new("/static", "static"))
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
