//! Teams, their players and their join requests; free-standing player management.

use crate::api::{read, write, ApiError, AppState};
use crate::auth::Session;
use crate::models::{Player, PlayerId, Team, TeamId, TournamentError};
use actix_web::{
    delete, get, post,
    web::{Json, Path},
    HttpResponse,
};
use serde::Deserialize;

#[derive(Deserialize)]
struct TeamBody {
    name: String,
    city: Option<String>,
    country: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerBody {
    name: String,
    position: Option<String>,
    jersey_number: Option<u32>,
    team_id: Option<TeamId>,
}

#[derive(Deserialize)]
struct TeamPath {
    id: TeamId,
}

#[derive(Deserialize)]
struct PlayerPath {
    id: PlayerId,
}

#[derive(Deserialize)]
struct TeamPlayerPath {
    team_id: TeamId,
    player_id: PlayerId,
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[get("/api/teams")]
async fn list_teams(state: AppState, _session: Session) -> Result<HttpResponse, ApiError> {
    let store = read(&state)?;
    Ok(HttpResponse::Ok().json(store.teams()))
}

#[post("/api/teams")]
async fn create_team(
    state: AppState,
    session: Session,
    body: Json<TeamBody>,
) -> Result<HttpResponse, ApiError> {
    session.require_admin()?;
    let body = body.into_inner();
    let team = Team::new(
        body.name.trim(),
        blank_to_none(body.city),
        blank_to_none(body.country),
    );
    let mut store = write(&state)?;
    Ok(HttpResponse::Ok().json(store.create_team(team)?))
}

#[get("/api/teams/{id}")]
async fn get_team(
    state: AppState,
    _session: Session,
    path: Path<TeamPath>,
) -> Result<HttpResponse, ApiError> {
    let store = read(&state)?;
    Ok(HttpResponse::Ok().json(store.team(path.id)?))
}

#[delete("/api/teams/{id}")]
async fn delete_team(
    state: AppState,
    session: Session,
    path: Path<TeamPath>,
) -> Result<HttpResponse, ApiError> {
    session.require_admin()?;
    write(&state)?.delete_team(path.id)?;
    Ok(HttpResponse::Ok().finish())
}

#[get("/api/teams/{id}/players")]
async fn list_team_players(
    state: AppState,
    _session: Session,
    path: Path<TeamPath>,
) -> Result<HttpResponse, ApiError> {
    let store = read(&state)?;
    Ok(HttpResponse::Ok().json(store.team_players(path.id)?))
}

#[post("/api/teams/{id}/players")]
async fn add_team_player(
    state: AppState,
    session: Session,
    path: Path<TeamPath>,
    body: Json<PlayerBody>,
) -> Result<HttpResponse, ApiError> {
    session.require_team(path.id)?;
    let body = body.into_inner();
    let player = Player::new(
        body.name.trim(),
        blank_to_none(body.position),
        body.jersey_number,
        Some(path.id),
    );
    let mut store = write(&state)?;
    Ok(HttpResponse::Ok().json(store.create_player(player)?))
}

/// Detach a player from the team; the player itself is kept.
#[delete("/api/teams/{team_id}/players/{player_id}")]
async fn remove_team_player(
    state: AppState,
    session: Session,
    path: Path<TeamPlayerPath>,
) -> Result<HttpResponse, ApiError> {
    session.require_team(path.team_id)?;
    let mut store = write(&state)?;
    Ok(HttpResponse::Ok().json(store.remove_player_from_team(path.team_id, path.player_id)?))
}

#[get("/api/teams/{id}/tournament-registrations")]
async fn list_team_requests(
    state: AppState,
    session: Session,
    path: Path<TeamPath>,
) -> Result<HttpResponse, ApiError> {
    session.require_team(path.id)?;
    let store = read(&state)?;
    Ok(HttpResponse::Ok().json(store.team_requests(path.id)?))
}

#[get("/api/teams/{id}/active-tournaments")]
async fn list_active_tournaments(
    state: AppState,
    _session: Session,
    path: Path<TeamPath>,
) -> Result<HttpResponse, ApiError> {
    let store = read(&state)?;
    Ok(HttpResponse::Ok().json(store.active_tournaments(path.id)?))
}

#[get("/api/players")]
async fn list_players(state: AppState, _session: Session) -> Result<HttpResponse, ApiError> {
    let store = read(&state)?;
    Ok(HttpResponse::Ok().json(store.players()))
}

#[post("/api/players")]
async fn create_player(
    state: AppState,
    session: Session,
    body: Json<PlayerBody>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    match body.team_id {
        Some(team_id) => session.require_team(team_id)?,
        None => session.require_admin()?,
    }
    if body.name.trim().is_empty() {
        return Err(TournamentError::Invalid("Player name cannot be empty".into()).into());
    }
    let player = Player::new(
        body.name.trim(),
        blank_to_none(body.position),
        body.jersey_number,
        body.team_id,
    );
    let mut store = write(&state)?;
    Ok(HttpResponse::Ok().json(store.create_player(player)?))
}

#[delete("/api/players/{id}")]
async fn delete_player(
    state: AppState,
    session: Session,
    path: Path<PlayerPath>,
) -> Result<HttpResponse, ApiError> {
    session.require_admin()?;
    write(&state)?.delete_player(path.id)?;
    Ok(HttpResponse::Ok().finish())
}
