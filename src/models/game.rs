//! A single bracket match and its status.

use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Match lifecycle. `Scheduled -> Completed` is one-way.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Completed,
}

/// Which participant slot of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Team1,
    Team2,
}

impl Slot {
    /// Slot in the next round fed by the match with this `match_number`: odd feeds team 1, even feeds team 2.
    pub fn fed_by(match_number: u32) -> Self {
        if match_number % 2 == 1 {
            Slot::Team1
        } else {
            Slot::Team2
        }
    }
}

/// One match of a single-elimination bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMatch {
    pub id: MatchId,
    /// 1 = first round.
    pub round: u32,
    /// Position within the round, starting at 1.
    pub match_number: u32,
    /// None = TBD or bye.
    pub team1: Option<Team>,
    pub team2: Option<Team>,
    pub status: MatchStatus,
    /// Present iff `status` is `Completed`.
    pub winner: Option<Team>,
}

impl GameMatch {
    pub fn new(round: u32, match_number: u32, team1: Option<Team>, team2: Option<Team>) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            match_number,
            team1,
            team2,
            status: MatchStatus::Scheduled,
            winner: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    pub fn slot(&self, slot: Slot) -> Option<&Team> {
        match slot {
            Slot::Team1 => self.team1.as_ref(),
            Slot::Team2 => self.team2.as_ref(),
        }
    }

    pub fn set_slot(&mut self, slot: Slot, team: Team) {
        match slot {
            Slot::Team1 => self.team1 = Some(team),
            Slot::Team2 => self.team2 = Some(team),
        }
    }

    /// The participant with this id, if it plays in this match.
    pub fn participant(&self, team_id: TeamId) -> Option<&Team> {
        self.team1
            .iter()
            .chain(self.team2.iter())
            .find(|t| t.id == team_id)
    }
}
