//! Session extraction from the `Authorization: Bearer <token>` header.

use crate::api::ApiError;
use crate::auth::{bearer_token, AuthError, Session, TokenIssuer};
use actix_web::{dev::Payload, http::header, web::Data, FromRequest, HttpRequest};
use std::future::{ready, Ready};

fn authenticate(req: &HttpRequest) -> Result<Session, ApiError> {
    let issuer = req
        .app_data::<Data<TokenIssuer>>()
        .ok_or_else(|| ApiError::Internal("token issuer not configured".into()))?;
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;
    let token = bearer_token(value).ok_or(AuthError::InvalidToken)?;
    Ok(issuer.verify(token)?)
}

impl FromRequest for Session {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
