//! Tournament manager: teams, join requests and single-elimination brackets behind a REST API.

pub mod api;
pub mod auth;
pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use auth::{Session, TokenIssuer};
pub use config::Config;
pub use logic::{
    build_bracket, can_access, dashboard_route, generate_bracket, query_round, record_winner,
    resolve_route, ClientRoute, WinnerOutcome,
};
pub use models::{
    Bracket, GameMatch, MatchId, MatchStatus, Player, PlayerId, RegistrationRequest,
    RegistrationStatus, Role, Slot, Team, TeamId, Tournament, TournamentError, TournamentId,
    TournamentStatus, User,
};
pub use store::Store;
