//! REST API: actix-web handlers under `/api`.
//!
//! Handlers expect two pieces of app data: the shared [`AppState`] store and a
//! [`TokenIssuer`](crate::auth::TokenIssuer) used to sign and check bearer tokens.

mod auth;
mod bracket;
mod error;
mod extract;
mod teams;
mod tournaments;

pub use error::ApiError;

use crate::models::TournamentError;
use crate::store::Store;
use actix_web::{
    get,
    web::{self, Data},
    HttpResponse, Responder,
};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory state shared by all workers.
pub type AppState = Data<RwLock<Store>>;

pub(crate) fn read(state: &AppState) -> Result<RwLockReadGuard<'_, Store>, ApiError> {
    state
        .read()
        .map_err(|_| ApiError::Internal("lock error".into()))
}

pub(crate) fn write(state: &AppState) -> Result<RwLockWriteGuard<'_, Store>, ApiError> {
    state
        .write()
        .map_err(|_| ApiError::Internal("lock error".into()))
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-manager",
    })
}

/// Register every API route plus a JSON extractor that reports bad bodies as 400 `{"error"}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::from(TournamentError::Invalid(err.to_string())).into()
    }))
    .service(api_health)
    .service(auth::register_admin)
    .service(auth::register_team)
    .service(auth::login)
    .service(auth::me)
    // Static segment before `/api/tournaments/{id}`.
    .service(tournaments::list_all_requests)
    .service(tournaments::list_tournaments)
    .service(tournaments::create_tournament)
    .service(tournaments::get_tournament)
    .service(tournaments::delete_tournament)
    .service(tournaments::list_tournament_teams)
    .service(tournaments::assign_team)
    .service(tournaments::unassign_team)
    .service(tournaments::request_to_join)
    .service(tournaments::list_tournament_requests)
    .service(tournaments::approve_request)
    .service(tournaments::reject_request)
    .service(bracket::generate_bracket)
    .service(bracket::get_bracket)
    .service(bracket::get_bracket_rounds)
    .service(bracket::record_winner)
    .service(bracket::list_matches)
    .service(bracket::get_match)
    .service(teams::list_teams)
    .service(teams::create_team)
    .service(teams::get_team)
    .service(teams::delete_team)
    .service(teams::list_team_players)
    .service(teams::add_team_player)
    .service(teams::remove_team_player)
    .service(teams::list_team_requests)
    .service(teams::list_active_tournaments)
    .service(teams::list_players)
    .service(teams::create_player)
    .service(teams::delete_player);
}
