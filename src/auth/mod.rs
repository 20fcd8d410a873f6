//! Authentication: Argon2 password hashes, signed bearer tokens and the per-request session.

mod password;
mod session;
mod token;

pub use password::{hash_password, verify_password};
pub use session::Session;
pub use token::{bearer_token, Claims, TokenIssuer};

use thiserror::Error;

/// Credential and token failures.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing authentication token")]
    MissingToken,
    #[error("Invalid authentication token")]
    InvalidToken,
    #[error("Authentication token expired")]
    TokenExpired,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Failed to hash password: {0}")]
    Hashing(String),
    #[error("Token lifetime is out of range")]
    TokenLifetime,
    #[error("Failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}
