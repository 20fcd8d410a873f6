//! Tournament business logic: bracket engine, join requests, client route access.

mod access;
mod bracket;
mod registration;

pub use access::{can_access, dashboard_route, resolve_route, ClientRoute};
pub use bracket::{build_bracket, generate_bracket, query_round, record_winner, WinnerOutcome};
pub use registration::{approve_request, reject_request, request_to_join};
