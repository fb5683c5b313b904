//! Single binary web server: REST API over the tournament snapshot.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, DATA_FILE (snapshot path, default tournament_data.json).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::Mutex;
use uuid::Uuid;
use wuzzel_tournament::{
    bracket_state, final_placement, generate_schedule, reset_bracket, seed_bracket,
    set_bracket_score, set_match_score, standings_csv, tournament_standings, Bracket,
    BracketRound, BracketState, GroupName, MatchRef, Placement, Score, Snapshot, Tournament,
    TournamentError,
};

/// Snapshot plus where it is written after every mutation.
struct AppContext {
    snapshot: Snapshot,
    data_file: PathBuf,
}

/// One organizer, one snapshot. The lock is held across the write so saves never reorder.
type AppState = Data<Mutex<AppContext>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct TournamentListResponse<'a> {
    tournaments: Vec<&'a str>,
    current_tournament: Option<&'a str>,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default = "today")]
    date: chrono::NaiveDate,
    #[serde(default)]
    group_phase: bool,
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    #[serde(default)]
    avatar: Option<String>,
}

#[derive(Deserialize)]
struct CreateTeamBody {
    name: String,
    player_ids: [Uuid; 2],
}

#[derive(Deserialize)]
struct ScoreBody {
    score: String,
}

/// `accepted: false` means the text was malformed and `score` is the kept value.
#[derive(Serialize)]
struct ScoreResponse {
    accepted: bool,
    score: Score,
}

#[derive(Serialize)]
struct BracketView {
    state: BracketState,
    bracket: Option<Bracket>,
    /// Tied knockout matches: unresolved, replay required.
    unresolved: Vec<BracketRound>,
    placement: Option<Placement>,
}

/// Path segment: tournament name (e.g. /api/tournaments/{name}/select)
#[derive(Deserialize)]
struct TournamentPath {
    name: String,
}

#[derive(Deserialize)]
struct MatchPath {
    number: u32,
}

#[derive(Deserialize)]
struct GroupMatchPath {
    group: GroupName,
    number: u32,
}

#[derive(Deserialize)]
struct BracketRoundPath {
    round: BracketRound,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::TournamentNotFound(_)
        | TournamentError::NoTournamentSelected
        | TournamentError::MatchNotFound
        | TournamentError::PlayerNotFound(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Replace the snapshot file as a whole: write a sibling temp file, then rename it over the target.
async fn persist(ctx: &AppContext) -> std::io::Result<()> {
    let json = ctx
        .snapshot
        .to_json()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    let tmp = ctx.data_file.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, &ctx.data_file).await
}

/// Save, then answer with `body`. If the write fails, `previous` is put back
/// so memory never holds a change the file does not.
async fn commit<T: Serialize>(ctx: &mut AppContext, previous: Snapshot, body: &T) -> HttpResponse {
    match persist(ctx).await {
        Ok(()) => HttpResponse::Ok().json(body),
        Err(e) => {
            log::error!("Could not write {}: {}", ctx.data_file.display(), e);
            ctx.snapshot = previous;
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Could not save tournament data" }))
        }
    }
}

/// Run `f` on the current tournament and persist on success.
async fn mutate_current<R, F>(state: &AppState, f: F) -> HttpResponse
where
    R: Serialize,
    F: FnOnce(&mut Tournament) -> Result<R, TournamentError>,
{
    let mut ctx = state.lock().await;
    let previous = ctx.snapshot.clone();
    let result = ctx.snapshot.current_mut().and_then(f);
    match result {
        Ok(body) => commit(&mut ctx, previous, &body).await,
        Err(e) => {
            ctx.snapshot = previous;
            error_response(&e)
        }
    }
}

async fn read_current<R, F>(state: &AppState, f: F) -> HttpResponse
where
    R: Serialize,
    F: FnOnce(&Tournament) -> R,
{
    let ctx = state.lock().await;
    match ctx.snapshot.current() {
        Ok(t) => HttpResponse::Ok().json(f(t)),
        Err(e) => error_response(&e),
    }
}

fn bracket_view(t: &Tournament) -> BracketView {
    BracketView {
        state: bracket_state(t),
        bracket: t.ko_round.clone(),
        unresolved: t
            .ko_round
            .as_ref()
            .map(Bracket::unresolved)
            .unwrap_or_default(),
        placement: final_placement(t).ok().flatten(),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "wuzzel-tournament",
    })
}

#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    let ctx = state.lock().await;
    HttpResponse::Ok().json(TournamentListResponse {
        tournaments: ctx.snapshot.tournament_names(),
        current_tournament: ctx.snapshot.current_tournament.as_deref(),
    })
}

/// Create a tournament and select it.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let mut ctx = state.lock().await;
    let previous = ctx.snapshot.clone();
    let body = body.into_inner();
    let created = ctx
        .snapshot
        .create_tournament(body.name, body.date, body.group_phase)
        .map(|t| t.clone());
    match created {
        Ok(t) => commit(&mut ctx, previous, &t).await,
        Err(e) => error_response(&e),
    }
}

#[post("/api/tournaments/{name}/select")]
async fn api_select_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut ctx = state.lock().await;
    let previous = ctx.snapshot.clone();
    let selected = ctx
        .snapshot
        .select_tournament(&path.name)
        .and_then(|()| ctx.snapshot.current().cloned());
    match selected {
        Ok(t) => {
            log::info!("Selected tournament '{}'", t.name);
            commit(&mut ctx, previous, &t).await
        }
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournament")]
async fn api_get_tournament(state: AppState) -> HttpResponse {
    read_current(&state, Tournament::clone).await
}

#[post("/api/tournament/players")]
async fn api_add_player(state: AppState, body: Json<AddPlayerBody>) -> HttpResponse {
    let body = body.into_inner();
    mutate_current(&state, |t| {
        t.add_player(body.name, body.avatar)?;
        Ok(t.clone())
    })
    .await
}

/// Players not yet on a team.
#[get("/api/tournament/players/available")]
async fn api_available_players(state: AppState) -> HttpResponse {
    read_current(&state, |t| {
        t.available_players()
            .into_iter()
            .cloned()
            .collect::<Vec<_>>()
    })
    .await
}

#[post("/api/tournament/teams")]
async fn api_create_team(state: AppState, body: Json<CreateTeamBody>) -> HttpResponse {
    let body = body.into_inner();
    let [first, second] = body.player_ids;
    mutate_current(&state, |t| {
        t.create_team(body.name, first, second)?;
        Ok(t.clone())
    })
    .await
}

/// Generate the schedule (once per tournament).
#[post("/api/tournament/schedule")]
async fn api_generate_schedule(state: AppState) -> HttpResponse {
    mutate_current(&state, |t| {
        generate_schedule(t)?;
        Ok(t.clone())
    })
    .await
}

#[put("/api/tournament/matches/{number}/score")]
async fn api_set_match_score(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let match_ref = MatchRef::League(path.number);
    score_response(&state, match_ref, &body.score).await
}

#[put("/api/tournament/groups/{group}/matches/{number}/score")]
async fn api_set_group_match_score(
    state: AppState,
    path: Path<GroupMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let match_ref = MatchRef::Group(path.group, path.number);
    score_response(&state, match_ref, &body.score).await
}

async fn score_response(state: &AppState, match_ref: MatchRef, raw: &str) -> HttpResponse {
    mutate_current(state, |t| {
        let accepted = set_match_score(t, match_ref, raw)?;
        let matches = match match_ref {
            MatchRef::League(_) => &t.matches,
            MatchRef::Group(group, _) => t.group_matches.get(group),
        };
        let number = match match_ref {
            MatchRef::League(n) | MatchRef::Group(_, n) => n,
        };
        let score = matches
            .iter()
            .find(|m| m.match_number == number)
            .map(|m| m.score)
            .ok_or(TournamentError::MatchNotFound)?;
        Ok(ScoreResponse { accepted, score })
    })
    .await
}

/// Standings, recomputed from the recorded scores.
#[get("/api/tournament/standings")]
async fn api_standings(state: AppState) -> HttpResponse {
    read_current(&state, tournament_standings).await
}

#[get("/api/tournament/standings.csv")]
async fn api_standings_csv(state: AppState) -> HttpResponse {
    let ctx = state.lock().await;
    let t = match ctx.snapshot.current() {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    match standings_csv(&tournament_standings(t)) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => {
            log::error!("Could not export standings: {}", e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Could not export standings" }))
        }
    }
}

#[get("/api/tournament/bracket")]
async fn api_get_bracket(state: AppState) -> HttpResponse {
    read_current(&state, bracket_view).await
}

/// Seed the knockout round from the current standings (only while unseeded).
#[post("/api/tournament/bracket")]
async fn api_seed_bracket(state: AppState) -> HttpResponse {
    mutate_current(&state, |t| {
        seed_bracket(t)?;
        Ok(bracket_view(t))
    })
    .await
}

/// Discard the knockout round (explicit confirmation before re-seeding).
#[delete("/api/tournament/bracket")]
async fn api_reset_bracket(state: AppState) -> HttpResponse {
    mutate_current(&state, |t| {
        reset_bracket(t);
        Ok(bracket_view(t))
    })
    .await
}

#[put("/api/tournament/bracket/{round}/score")]
async fn api_set_bracket_score(
    state: AppState,
    path: Path<BracketRoundPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let round = path.round;
    mutate_current(&state, |t| {
        set_bracket_score(t, round, &body.score)?;
        Ok(bracket_view(t))
    })
    .await
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_file() -> PathBuf {
    PathBuf::from("tournament_data.json")
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let data_file = std::env::var("DATA_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_data_file());

    let snapshot = Snapshot::load(&data_file)?;
    log::info!(
        "Loaded {} tournament(s) from {}",
        snapshot.tournaments.len(),
        data_file.display()
    );

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(Mutex::new(AppContext {
        snapshot,
        data_file,
    }));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_list_tournaments)
            .service(api_create_tournament)
            .service(api_select_tournament)
            .service(api_get_tournament)
            .service(api_add_player)
            .service(api_available_players)
            .service(api_create_team)
            .service(api_generate_schedule)
            .service(api_set_match_score)
            .service(api_set_group_match_score)
            .service(api_standings)
            .service(api_standings_csv)
            .service(api_get_bracket)
            .service(api_seed_bracket)
            .service(api_reset_bracket)
            .service(api_set_bracket_score)
    })
    .bind(bind)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    fn state_writing_to(data_file: PathBuf) -> AppState {
        let mut snapshot = Snapshot::default();
        snapshot
            .create_tournament("Cup", chrono::NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(), false)
            .unwrap();
        Data::new(Mutex::new(AppContext {
            snapshot,
            data_file,
        }))
    }

    #[actix_web::test]
    async fn failed_save_leaves_memory_unchanged() {
        let missing_dir = std::env::temp_dir().join(format!("wuzzel-{}", Uuid::new_v4()));
        let state = state_writing_to(missing_dir.join("tournament_data.json"));

        let resp = mutate_current(&state, |t| {
            t.add_player("Anna", None)?;
            Ok(t.clone())
        })
        .await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let ctx = state.lock().await;
        assert!(ctx.snapshot.current().unwrap().players.is_empty());
    }

    #[actix_web::test]
    async fn successful_save_keeps_the_change() {
        let data_file = std::env::temp_dir().join(format!("wuzzel-{}.json", Uuid::new_v4()));
        let state = state_writing_to(data_file.clone());

        let resp = mutate_current(&state, |t| {
            t.add_player("Anna", None)?;
            Ok(t.clone())
        })
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let on_disk = Snapshot::load(&data_file).unwrap();
        std::fs::remove_file(&data_file).unwrap();
        let ctx = state.lock().await;
        assert_eq!(ctx.snapshot.current().unwrap().players.len(), 1);
        assert_eq!(on_disk, ctx.snapshot);
    }
}
