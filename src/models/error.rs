//! Errors that can occur during tournament operations.

use crate::models::game::MatchId;
use crate::models::registration::RegistrationRequestId;
use crate::models::team::{PlayerId, TeamId};
use crate::models::tournament::TournamentId;
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// A bracket already exists; regeneration and roster changes are not supported.
    #[error("A bracket has already been generated for this tournament")]
    AlreadyGenerated,
    /// No bracket has been generated yet.
    #[error("No bracket has been generated for this tournament")]
    NotGenerated,
    /// Winner posted on a completed match or one with a TBD slot.
    #[error("Match {0} cannot be resolved: it is already completed or still waiting for a participant")]
    MatchNotSchedulable(MatchId),
    /// Winner id is not one of the match participants.
    #[error("Team {team_id} is not a participant of match {match_id}")]
    InvalidWinner { match_id: MatchId, team_id: TeamId },
    #[error("Need at least one team to generate a bracket")]
    NoTeams,
    #[error("Tournament not found")]
    TournamentNotFound(TournamentId),
    #[error("Team not found")]
    TeamNotFound(TeamId),
    #[error("Player not found")]
    PlayerNotFound(PlayerId),
    #[error("Match not found")]
    MatchNotFound(MatchId),
    #[error("Registration request not found")]
    RequestNotFound(RegistrationRequestId),
    /// Caller lacks the role or ownership for this action.
    #[error("Forbidden")]
    Forbidden,
    #[error("Tournament has reached maximum team limit ({max})")]
    TeamLimitReached { max: usize },
    #[error("Team is already registered for this tournament")]
    TeamAlreadyAssigned(TeamId),
    #[error("Team is not registered for this tournament")]
    TeamNotAssigned(TeamId),
    #[error("Team already has a pending request for this tournament")]
    RequestAlreadyPending,
    #[error("Registration request has already been decided")]
    RequestAlreadyDecided(RegistrationRequestId),
    #[error("Team is part of a generated bracket")]
    TeamInBracket(TeamId),
    #[error("Player does not belong to this team")]
    PlayerNotOnTeam { player_id: PlayerId, team_id: TeamId },
    #[error("Username already exists")]
    UsernameTaken,
    /// Request body failed validation (empty name, bad dates, ...).
    #[error("{0}")]
    Invalid(String),
}
