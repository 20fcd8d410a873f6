//! Bracket generation, fetching and winner recording.

use crate::api::{read, write, ApiError, AppState};
use crate::auth::Session;
use crate::logic::query_round;
use crate::models::{GameMatch, MatchId, TeamId, TournamentId};
use actix_web::{
    get, post,
    web::{Json, Path},
    HttpResponse,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct MatchPath {
    id: TournamentId,
    match_id: MatchId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WinnerBody {
    winner_team_id: TeamId,
}

#[derive(Serialize)]
struct RoundView<'a> {
    round: u32,
    matches: Vec<&'a GameMatch>,
}

/// Create every match of the bracket from the assigned teams. Only once per tournament.
#[post("/api/tournaments/{id}/bracket/generate")]
async fn generate_bracket(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
) -> Result<HttpResponse, ApiError> {
    session.require_admin()?;
    let mut store = write(&state)?;
    Ok(HttpResponse::Ok().json(store.generate_bracket(path.id)?))
}

/// All matches ordered by round then match number; empty before generation.
#[get("/api/tournaments/{id}/bracket")]
async fn get_bracket(
    state: AppState,
    _session: Session,
    path: Path<TournamentPath>,
) -> Result<HttpResponse, ApiError> {
    let store = read(&state)?;
    Ok(HttpResponse::Ok().json(store.bracket_matches(path.id)?))
}

/// Matches grouped by round for display.
#[get("/api/tournaments/{id}/bracket/rounds")]
async fn get_bracket_rounds(
    state: AppState,
    _session: Session,
    path: Path<TournamentPath>,
) -> Result<HttpResponse, ApiError> {
    let store = read(&state)?;
    let rounds: Vec<RoundView> = match store.tournament(path.id)?.bracket.as_ref() {
        Some(bracket) => (1..=bracket.round_count())
            .map(|round| RoundView {
                round,
                matches: query_round(bracket, round),
            })
            .collect(),
        None => Vec::new(),
    };
    Ok(HttpResponse::Ok().json(rounds))
}

/// Resolve a match. Responds with the completed match, the next-round match it fed and
/// the champion once the final is decided.
#[post("/api/tournaments/{id}/bracket/matches/{match_id}/winner")]
async fn record_winner(
    state: AppState,
    session: Session,
    path: Path<MatchPath>,
    body: Json<WinnerBody>,
) -> Result<HttpResponse, ApiError> {
    session.require_admin()?;
    let mut store = write(&state)?;
    let outcome = store.record_winner(path.id, path.match_id, body.winner_team_id)?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[get("/api/tournaments/{id}/matches")]
async fn list_matches(
    state: AppState,
    _session: Session,
    path: Path<TournamentPath>,
) -> Result<HttpResponse, ApiError> {
    let store = read(&state)?;
    Ok(HttpResponse::Ok().json(store.bracket_matches(path.id)?))
}

#[get("/api/tournaments/{id}/matches/{match_id}")]
async fn get_match(
    state: AppState,
    _session: Session,
    path: Path<MatchPath>,
) -> Result<HttpResponse, ApiError> {
    let store = read(&state)?;
    Ok(HttpResponse::Ok().json(store.bracket_match(path.id, path.match_id)?))
}
