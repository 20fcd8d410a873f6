//! Bracket: every match of one tournament, partitioned by round.

use crate::models::game::{GameMatch, MatchId, Slot};
use crate::models::team::Team;
use serde::{Deserialize, Serialize};

/// The full match collection of a single-elimination bracket.
///
/// Matches are kept ordered by `(round, match_number)`; round `r + 1` holds
/// `ceil(len(round r) / 2)` matches until a round of one match is reached.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bracket {
    matches: Vec<GameMatch>,
}

impl Bracket {
    /// Wrap an already laid out match list, restoring `(round, match_number)` order.
    pub fn from_matches(mut matches: Vec<GameMatch>) -> Self {
        matches.sort_by_key(|m| (m.round, m.match_number));
        Self { matches }
    }

    pub fn matches(&self) -> &[GameMatch] {
        &self.matches
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Number of rounds (0 for an empty bracket).
    pub fn round_count(&self) -> u32 {
        self.matches.iter().map(|m| m.round).max().unwrap_or(0)
    }

    /// Matches of one round, ordered by match number.
    pub fn round(&self, round: u32) -> impl Iterator<Item = &GameMatch> {
        self.matches.iter().filter(move |m| m.round == round)
    }

    pub fn get(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn get_mut(&mut self, id: MatchId) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    pub fn at(&self, round: u32, match_number: u32) -> Option<&GameMatch> {
        self.matches
            .iter()
            .find(|m| m.round == round && m.match_number == match_number)
    }

    pub fn at_mut(&mut self, round: u32, match_number: u32) -> Option<&mut GameMatch> {
        self.matches
            .iter_mut()
            .find(|m| m.round == round && m.match_number == match_number)
    }

    /// The match in the previous round whose winner fills `slot` of `(round, match_number)`.
    /// None for round 1 and for slots no match feeds (byes).
    pub fn feeder(&self, round: u32, match_number: u32, slot: Slot) -> Option<&GameMatch> {
        if round <= 1 {
            return None;
        }
        let feeder_number = match slot {
            Slot::Team1 => 2 * match_number - 1,
            Slot::Team2 => 2 * match_number,
        };
        self.at(round - 1, feeder_number)
    }

    /// The final match (single match of the last round).
    pub fn final_match(&self) -> Option<&GameMatch> {
        self.at(self.round_count(), 1)
    }

    /// Winner of the final, once it has been recorded.
    pub fn champion(&self) -> Option<&Team> {
        self.final_match().and_then(|m| m.winner.as_ref())
    }

    pub fn is_finished(&self) -> bool {
        self.champion().is_some()
    }
}
