//! Mapping of domain and auth failures to HTTP responses.

use crate::auth::AuthError;
use crate::models::TournamentError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Tournament(#[from] TournamentError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub(crate) fn blocking(err: actix_web::error::BlockingError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

fn tournament_status(err: &TournamentError) -> StatusCode {
    use TournamentError::*;
    match err {
        TournamentNotFound(_) | TeamNotFound(_) | PlayerNotFound(_) | MatchNotFound(_)
        | RequestNotFound(_) => StatusCode::NOT_FOUND,
        Forbidden => StatusCode::FORBIDDEN,
        AlreadyGenerated
        | NotGenerated
        | MatchNotSchedulable(_)
        | TeamLimitReached { .. }
        | TeamAlreadyAssigned(_)
        | RequestAlreadyPending
        | RequestAlreadyDecided(_)
        | TeamInBracket(_)
        | UsernameTaken => StatusCode::CONFLICT,
        InvalidWinner { .. } | NoTeams | TeamNotAssigned(_) | PlayerNotOnTeam { .. } | Invalid(_) => {
            StatusCode::BAD_REQUEST
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Tournament(e) => tournament_status(e),
            ApiError::Auth(
                AuthError::Hashing(_) | AuthError::Signing(_) | AuthError::TokenLifetime,
            ) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(status).json(serde_json::json!({ "error": self.to_string() }))
    }
}
