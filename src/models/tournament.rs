//! Tournament, TournamentStatus and the summary view used by join requests.

use crate::models::bracket::Bracket;
use crate::models::error::TournamentError;
use crate::models::team::{Team, TeamId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentStatus {
    /// Teams are being assigned; no bracket yet.
    #[default]
    Upcoming,
    /// Bracket generated, final not yet recorded.
    Ongoing,
    /// Final recorded; the bracket has a champion.
    Completed,
}

/// A tournament: dates, assigned teams (insertion order) and at most one bracket.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub status: TournamentStatus,
    /// Username of the administrator who created it.
    pub admin: Option<String>,
    /// Assigned teams, in the order they were added.
    pub teams: Vec<Team>,
    /// Skipped in listings; fetched through the bracket endpoints.
    #[serde(skip_serializing, default)]
    pub bracket: Option<Bracket>,
}

impl Tournament {
    /// Create an upcoming tournament. The end date may not precede the start date.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
    ) -> Result<Self, TournamentError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::Invalid("Tournament name cannot be empty".into()));
        }
        if end_date < start_date {
            return Err(TournamentError::Invalid(
                "End date cannot be before start date".into(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description,
            start_date,
            end_date,
            status: TournamentStatus::Upcoming,
            admin: None,
            teams: Vec::new(),
            bracket: None,
        })
    }

    pub fn with_admin(mut self, username: impl Into<String>) -> Self {
        self.admin = Some(username.into());
        self
    }

    pub fn has_bracket(&self) -> bool {
        self.bracket.as_ref().is_some_and(|b| !b.is_empty())
    }

    pub fn has_team(&self, team_id: TeamId) -> bool {
        self.teams.iter().any(|t| t.id == team_id)
    }

    /// Assign a team (only before the bracket exists). Fails when full or already assigned.
    pub fn assign_team(&mut self, team: Team, max_teams: usize) -> Result<(), TournamentError> {
        if self.has_bracket() {
            return Err(TournamentError::AlreadyGenerated);
        }
        if self.has_team(team.id) {
            return Err(TournamentError::TeamAlreadyAssigned(team.id));
        }
        if self.teams.len() >= max_teams {
            return Err(TournamentError::TeamLimitReached { max: max_teams });
        }
        self.teams.push(team);
        Ok(())
    }

    /// Remove a team (only before the bracket exists).
    pub fn unassign_team(&mut self, team_id: TeamId) -> Result<(), TournamentError> {
        if self.has_bracket() {
            return Err(TournamentError::AlreadyGenerated);
        }
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(TournamentError::TeamNotAssigned(team_id))?;
        self.teams.remove(idx);
        Ok(())
    }

    pub fn summary(&self) -> TournamentSummary {
        TournamentSummary {
            id: self.id,
            name: self.name.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
        }
    }
}

/// Tournament fields embedded in join requests.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSummary {
    pub id: TournamentId,
    pub name: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub status: TournamentStatus,
}
