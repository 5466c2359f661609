//! Single binary web server: JSON API over the league store.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Mutating endpoints need `Authorization: Bearer <ADMIN_TOKEN>`.

use actix_web::{
    get, http::header, post, put,
    web::{Data, Json, Path},
    App, HttpRequest, HttpResponse, HttpServer, Responder,
};
use league_fixtures::{
    bearer_token, write_schedule_csv, Authorizer, FixtureId, FixtureUpsert, GroupId, GroupRecord,
    League, LeagueError, Permission, ServerConfig, TokenAuthorizer,
};
use serde::Deserialize;
use std::sync::RwLock;

/// In-memory league shared by all workers.
type AppState = Data<RwLock<League>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Path segment: group id (e.g. /api/groups/{id})
#[derive(Deserialize)]
struct GroupPath {
    id: GroupId,
}

/// Path segment: fixture id (e.g. /api/fixtures/{fixture_id})
#[derive(Deserialize)]
struct FixturePath {
    fixture_id: FixtureId,
}

fn error_response(e: &LeagueError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        LeagueError::GroupNotFound(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// 403 unless the request's bearer token holds `permission`.
fn authorize(
    req: &HttpRequest,
    auth: &TokenAuthorizer,
    permission: Permission,
) -> Result<(), HttpResponse> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if auth.has_permission(bearer_token(value), permission) {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden()
            .json(serde_json::json!({ "error": format!("Missing permission {}", permission.name()) })))
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "league-fixtures",
    })
}

/// List all groups.
#[get("/api/groups")]
async fn api_list_groups(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(g.groups())
}

/// Create or replace a group from a query-layer record.
#[post("/api/groups")]
async fn api_create_group(
    req: HttpRequest,
    state: AppState,
    auth: Data<TokenAuthorizer>,
    body: Json<GroupRecord>,
) -> HttpResponse {
    if let Err(resp) = authorize(&req, &auth, Permission::ManageCompetitions) {
        return resp;
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.add_group(body.into_inner()) {
        Ok(group) => HttpResponse::Ok().json(group),
        Err(e) => error_response(&e),
    }
}

/// Get a group by id (404 if not found).
#[get("/api/groups/{id}")]
async fn api_get_group(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.group(path.id) {
        Ok(group) => HttpResponse::Ok().json(group),
        Err(e) => error_response(&e),
    }
}

/// Generate the draft schedule for a group, replacing the previous draft.
#[post("/api/groups/{id}/schedule/generate")]
async fn api_generate_schedule(
    req: HttpRequest,
    state: AppState,
    auth: Data<TokenAuthorizer>,
    path: Path<GroupPath>,
) -> HttpResponse {
    if let Err(resp) = authorize(&req, &auth, Permission::ManageCompetitions) {
        return resp;
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.generate_schedule(path.id) {
        Ok(gamedays) => HttpResponse::Ok().json(gamedays),
        Err(e) => error_response(&e),
    }
}

/// Current draft schedule of a group.
#[get("/api/groups/{id}/schedule")]
async fn api_get_schedule(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.schedule(path.id) {
        Ok(gamedays) => HttpResponse::Ok().json(gamedays),
        Err(e) => error_response(&e),
    }
}

/// Draft schedule as CSV.
#[get("/api/groups/{id}/schedule.csv")]
async fn api_export_schedule(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let group = match g.group(path.id) {
        Ok(group) => group,
        Err(e) => return error_response(&e),
    };
    let gamedays = g.schedule(path.id).unwrap_or_default();
    let mut out = Vec::new();
    if let Err(e) = write_schedule_csv(gamedays, &group.competitors, &mut out) {
        log::error!("CSV export for group {} failed: {}", path.id, e);
        return HttpResponse::InternalServerError().body("export error");
    }
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .body(out)
}

/// Saved fixtures of a group.
#[get("/api/groups/{id}/fixtures")]
async fn api_list_fixtures(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.fixtures_for_group(path.id) {
        Ok(fixtures) => HttpResponse::Ok().json(fixtures),
        Err(e) => error_response(&e),
    }
}

/// Save an edited fixture (insert or replace by id).
#[put("/api/fixtures/{fixture_id}")]
async fn api_upsert_fixture(
    req: HttpRequest,
    state: AppState,
    auth: Data<TokenAuthorizer>,
    path: Path<FixturePath>,
    body: Json<FixtureUpsert>,
) -> HttpResponse {
    if let Err(resp) = authorize(&req, &auth, Permission::ManageMatches) {
        return resp;
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.upsert_fixture(path.fixture_id, body.into_inner()) {
        Ok(fixture) => HttpResponse::Ok().json(fixture),
        Err(e) => error_response(&e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let authorizer = TokenAuthorizer::new(config.admin_token.clone());
    if !authorizer.is_configured() {
        log::warn!("ADMIN_TOKEN is not set; mutating endpoints will answer 403");
    }
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state = Data::new(RwLock::new(League::new()));
    let auth = Data::new(authorizer);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(auth.clone())
            .service(api_health)
            .service(api_list_groups)
            .service(api_create_group)
            .service(api_export_schedule)
            .service(api_get_schedule)
            .service(api_generate_schedule)
            .service(api_list_fixtures)
            .service(api_get_group)
            .service(api_upsert_fixture)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
