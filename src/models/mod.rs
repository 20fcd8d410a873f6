//! Data structures for tournaments: teams, players, matches, brackets, join requests, users.

mod bracket;
mod error;
mod game;
mod registration;
mod team;
mod tournament;
mod user;

pub use bracket::Bracket;
pub use error::TournamentError;
pub use game::{GameMatch, MatchId, MatchStatus, Slot};
pub use registration::{RegistrationRequest, RegistrationRequestId, RegistrationStatus};
pub use team::{Player, PlayerId, Team, TeamId};
pub use tournament::{Tournament, TournamentId, TournamentStatus, TournamentSummary};
pub use user::{Role, User, UserId};
