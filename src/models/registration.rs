//! Team join requests for tournaments.

use crate::models::team::Team;
use crate::models::tournament::TournamentSummary;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type RegistrationRequestId = Uuid;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// A team's request to join a tournament, decided by an administrator.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub id: RegistrationRequestId,
    pub team: Team,
    pub tournament: TournamentSummary,
    pub status: RegistrationStatus,
    pub request_date: NaiveDateTime,
    pub response_date: Option<NaiveDateTime>,
    pub rejection_message: Option<String>,
}

impl RegistrationRequest {
    pub fn new(team: Team, tournament: TournamentSummary, request_date: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            team,
            tournament,
            status: RegistrationStatus::Pending,
            request_date,
            response_date: None,
            rejection_message: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == RegistrationStatus::Pending
    }
}
