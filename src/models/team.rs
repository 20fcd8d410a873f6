//! Team and Player data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in matches, rosters and join requests).
pub type TeamId = Uuid;

/// Unique identifier for a player.
pub type PlayerId = Uuid;

/// A team. Immutable once it has been placed into a bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub city: Option<String>,
    pub country: Option<String>,
}

impl Team {
    /// Create a new team with a fresh id.
    pub fn new(name: impl Into<String>, city: Option<String>, country: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            city,
            country,
        }
    }
}

/// A player, optionally belonging to a team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Option<String>,
    pub jersey_number: Option<u32>,
    /// None while the player is a free agent.
    pub team_id: Option<TeamId>,
}

impl Player {
    pub fn new(
        name: impl Into<String>,
        position: Option<String>,
        jersey_number: Option<u32>,
        team_id: Option<TeamId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            position,
            jersey_number,
            team_id,
        }
    }
}
