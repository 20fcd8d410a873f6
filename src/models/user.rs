//! Accounts that can sign in.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type UserId = Uuid;

/// What an account may do: administrators run tournaments, teams manage themselves.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Team,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// PHC string (Argon2id); never sent to clients.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    /// Set for `Role::Team` accounts.
    pub team_id: Option<TeamId>,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        password_hash: String,
        role: Role,
        team_id: Option<TeamId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password_hash,
            role,
            team_id,
        }
    }
}
