//! Tournament CRUD, team assignment and the join-request workflow.

use crate::api::{read, write, ApiError, AppState};
use crate::auth::Session;
use crate::models::{
    RegistrationRequestId, TeamId, Tournament, TournamentError, TournamentId,
};
use actix_web::{
    delete, get, post,
    web::{Json, Path},
    HttpResponse,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTournamentBody {
    name: String,
    description: Option<String>,
    start_date: String,
    end_date: String,
}

#[derive(Deserialize)]
struct TeamRef {
    id: TeamId,
}

/// Body of a join request: `{"team": {"id": ...}}`.
#[derive(Deserialize)]
struct JoinBody {
    team: TeamRef,
}

#[derive(Deserialize)]
struct RejectBody {
    message: Option<String>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and team id (e.g. /api/tournaments/{id}/teams/{team_id})
#[derive(Deserialize)]
struct TournamentTeamPath {
    id: TournamentId,
    team_id: TeamId,
}

#[derive(Deserialize)]
struct RequestPath {
    id: TournamentId,
    request_id: RegistrationRequestId,
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS[.fff]]` or a plain `YYYY-MM-DD`.
pub fn parse_datetime(field: &str, raw: &str) -> Result<NaiveDateTime, TournamentError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_utc());
    }
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| TournamentError::Invalid(format!("{field} must be an ISO-8601 date")))
}

pub(crate) fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[get("/api/tournaments")]
async fn list_tournaments(state: AppState, _session: Session) -> Result<HttpResponse, ApiError> {
    let store = read(&state)?;
    Ok(HttpResponse::Ok().json(store.tournaments()))
}

#[post("/api/tournaments")]
async fn create_tournament(
    state: AppState,
    session: Session,
    body: Json<CreateTournamentBody>,
) -> Result<HttpResponse, ApiError> {
    session.require_admin()?;
    let body = body.into_inner();
    let start = parse_datetime("startDate", &body.start_date)?;
    let end = parse_datetime("endDate", &body.end_date)?;
    let description = body.description.filter(|d| !d.trim().is_empty());
    let tournament = Tournament::new(body.name, description, start, end)?.with_admin(session.username);
    let mut store = write(&state)?;
    Ok(HttpResponse::Ok().json(store.insert_tournament(tournament)))
}

/// Admin view of every join request.
#[get("/api/tournaments/registration-requests")]
async fn list_all_requests(state: AppState, session: Session) -> Result<HttpResponse, ApiError> {
    session.require_admin()?;
    let store = read(&state)?;
    Ok(HttpResponse::Ok().json(store.requests()))
}

#[get("/api/tournaments/{id}")]
async fn get_tournament(
    state: AppState,
    _session: Session,
    path: Path<TournamentPath>,
) -> Result<HttpResponse, ApiError> {
    let store = read(&state)?;
    Ok(HttpResponse::Ok().json(store.tournament(path.id)?))
}

#[delete("/api/tournaments/{id}")]
async fn delete_tournament(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
) -> Result<HttpResponse, ApiError> {
    session.require_admin()?;
    write(&state)?.delete_tournament(path.id)?;
    Ok(HttpResponse::Ok().finish())
}

#[get("/api/tournaments/{id}/teams")]
async fn list_tournament_teams(
    state: AppState,
    _session: Session,
    path: Path<TournamentPath>,
) -> Result<HttpResponse, ApiError> {
    let store = read(&state)?;
    Ok(HttpResponse::Ok().json(store.tournament_teams(path.id)?))
}

#[post("/api/tournaments/{id}/teams/{team_id}")]
async fn assign_team(
    state: AppState,
    session: Session,
    path: Path<TournamentTeamPath>,
) -> Result<HttpResponse, ApiError> {
    session.require_admin()?;
    let mut store = write(&state)?;
    Ok(HttpResponse::Ok().json(store.assign_team(path.id, path.team_id)?))
}

#[delete("/api/tournaments/{id}/teams/{team_id}")]
async fn unassign_team(
    state: AppState,
    session: Session,
    path: Path<TournamentTeamPath>,
) -> Result<HttpResponse, ApiError> {
    session.require_admin()?;
    let mut store = write(&state)?;
    Ok(HttpResponse::Ok().json(store.unassign_team(path.id, path.team_id)?))
}

/// A team asks to join; team accounts may only ask for themselves.
#[post("/api/tournaments/{id}/register-team")]
async fn request_to_join(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
    body: Json<JoinBody>,
) -> Result<HttpResponse, ApiError> {
    session.require_team(body.team.id)?;
    let mut store = write(&state)?;
    Ok(HttpResponse::Created().json(store.request_to_join(path.id, body.team.id, now())?))
}

#[get("/api/tournaments/{id}/registration-requests")]
async fn list_tournament_requests(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
) -> Result<HttpResponse, ApiError> {
    session.require_admin()?;
    let store = read(&state)?;
    Ok(HttpResponse::Ok().json(store.tournament_requests(path.id)?))
}

#[post("/api/tournaments/{id}/registration-requests/{request_id}/approve")]
async fn approve_request(
    state: AppState,
    session: Session,
    path: Path<RequestPath>,
) -> Result<HttpResponse, ApiError> {
    session.require_admin()?;
    let mut store = write(&state)?;
    Ok(HttpResponse::Ok().json(store.approve_request(path.id, path.request_id, now())?))
}

#[post("/api/tournaments/{id}/registration-requests/{request_id}/reject")]
async fn reject_request(
    state: AppState,
    session: Session,
    path: Path<RequestPath>,
    body: Option<Json<RejectBody>>,
) -> Result<HttpResponse, ApiError> {
    session.require_admin()?;
    let message = body.and_then(|b| b.into_inner().message);
    let mut store = write(&state)?;
    Ok(HttpResponse::Ok().json(store.reject_request(path.id, path.request_id, message, now())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_browser_and_iso_dates() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 1)
            .and_then(|d| d.and_hms_opt(10, 30, 0))
            .unwrap();
        assert_eq!(parse_datetime("d", "2025-06-01T10:30").unwrap(), expected);
        assert_eq!(parse_datetime("d", "2025-06-01T10:30:00").unwrap(), expected);
        assert_eq!(parse_datetime("d", "2025-06-01T10:30:00Z").unwrap(), expected);
        assert_eq!(
            parse_datetime("d", "2025-06-01").unwrap(),
            expected.date().and_hms_opt(0, 0, 0).unwrap()
        );
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(matches!(
            parse_datetime("startDate", "next tuesday"),
            Err(TournamentError::Invalid(_))
        ));
    }
}
