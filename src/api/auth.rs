//! Sign-up, sign-in and the current session.

use crate::api::{read, write, ApiError, AppState};
use crate::auth::{hash_password, verify_password, AuthError, Session, TokenIssuer};
use crate::logic::ClientRoute;
use crate::models::{Role, Team, TeamId, TournamentError, User};
use actix_web::{
    get, post,
    web::{self, Data, Json},
    HttpResponse,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct CredentialsBody {
    username: String,
    password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterTeamBody {
    username: String,
    password: String,
    team_name: String,
    city: Option<String>,
    country: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    token: String,
    username: String,
    role: Role,
    team_id: Option<TeamId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MeResponse {
    #[serde(flatten)]
    session: Session,
    dashboard: ClientRoute,
    routes: Vec<ClientRoute>,
}

fn check_credentials(username: &str, password: &str) -> Result<(), TournamentError> {
    if username.trim().is_empty() {
        return Err(TournamentError::Invalid("Username cannot be empty".into()));
    }
    if password.trim().is_empty() {
        return Err(TournamentError::Invalid("Password cannot be empty".into()));
    }
    Ok(())
}

async fn hash(password: String) -> Result<String, ApiError> {
    Ok(web::block(move || hash_password(&password))
        .await
        .map_err(ApiError::blocking)??)
}

/// Create an administrator. Open until the first admin exists; afterwards an admin token is required.
#[post("/api/auth/register-admin")]
async fn register_admin(
    state: AppState,
    session: Option<Session>,
    body: Json<CredentialsBody>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    check_credentials(&body.username, &body.password)?;
    let allowed = |has_admin: bool| !has_admin || session.as_ref().is_some_and(Session::is_admin);
    if !allowed(read(&state)?.has_admin()) {
        return Err(TournamentError::Forbidden.into());
    }
    let password_hash = hash(body.password).await?;

    let mut store = write(&state)?;
    if !allowed(store.has_admin()) {
        return Err(TournamentError::Forbidden.into());
    }
    let user = store.insert_user(User::new(
        body.username.trim(),
        password_hash,
        Role::Admin,
        None,
    ))?;
    Ok(HttpResponse::Ok().json(user))
}

/// Create a team and the account that manages it.
#[post("/api/auth/register-team")]
async fn register_team(state: AppState, body: Json<RegisterTeamBody>) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    check_credentials(&body.username, &body.password)?;
    if body.team_name.trim().is_empty() {
        return Err(TournamentError::Invalid("Team name cannot be empty".into()).into());
    }
    if read(&state)?.user(&body.username).is_some() {
        return Err(TournamentError::UsernameTaken.into());
    }
    let password_hash = hash(body.password).await?;

    let team = Team::new(body.team_name.trim(), body.city, body.country);
    let mut store = write(&state)?;
    let user = store.register_team_account(team, &body.username, password_hash)?;
    Ok(HttpResponse::Ok().json(user))
}

#[post("/api/auth/login")]
async fn login(
    state: AppState,
    tokens: Data<TokenIssuer>,
    body: Json<CredentialsBody>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    check_credentials(&body.username, &body.password)?;
    let user = read(&state)?.user(body.username.trim()).cloned();
    let Some(user) = user else {
        log::warn!("Login failed for user {}: unknown username", body.username);
        return Err(AuthError::InvalidCredentials.into());
    };

    let password = body.password;
    let password_hash = user.password_hash.clone();
    let valid = web::block(move || verify_password(&password, &password_hash))
        .await
        .map_err(ApiError::blocking)??;
    if !valid {
        log::warn!("Login failed for user {}: invalid credentials", user.username);
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = tokens.issue(&user)?;
    log::info!("Login successful for user {}", user.username);
    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        username: user.username,
        role: user.role,
        team_id: user.team_id,
    }))
}

/// The caller's session, landing page and the client routes it may open.
#[get("/api/auth/me")]
async fn me(session: Session) -> HttpResponse {
    HttpResponse::Ok().json(MeResponse {
        dashboard: session.dashboard(),
        routes: session.routes(),
        session,
    })
}
