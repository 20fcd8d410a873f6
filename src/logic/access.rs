//! Client route access by role, evaluated once per navigation.

use crate::models::{Role, TournamentId};
use serde::{Serialize, Serializer};

/// Pages of the browser client.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ClientRoute {
    Login,
    RegisterAdmin,
    RegisterTeam,
    /// Admin dashboard at `/`.
    Dashboard,
    TeamDashboard,
    JoinRequests,
    Tournaments,
    Teams,
    Players,
    Bracket(TournamentId),
    TournamentRegistration,
}

impl ClientRoute {
    /// Every route without a path parameter.
    pub const STATIC: [ClientRoute; 10] = [
        ClientRoute::Login,
        ClientRoute::RegisterAdmin,
        ClientRoute::RegisterTeam,
        ClientRoute::Dashboard,
        ClientRoute::TeamDashboard,
        ClientRoute::JoinRequests,
        ClientRoute::Tournaments,
        ClientRoute::Teams,
        ClientRoute::Players,
        ClientRoute::TournamentRegistration,
    ];

    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        let route = match path {
            "" => ClientRoute::Dashboard,
            "/login" => ClientRoute::Login,
            "/register-admin" => ClientRoute::RegisterAdmin,
            "/register-team" => ClientRoute::RegisterTeam,
            "/team-dashboard" => ClientRoute::TeamDashboard,
            "/join-requests" => ClientRoute::JoinRequests,
            "/tournaments" => ClientRoute::Tournaments,
            "/teams" => ClientRoute::Teams,
            "/players" => ClientRoute::Players,
            "/tournament-registration" => ClientRoute::TournamentRegistration,
            other => {
                let id = other
                    .strip_prefix("/tournaments/")?
                    .strip_suffix("/bracket")?
                    .parse()
                    .ok()?;
                ClientRoute::Bracket(id)
            }
        };
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            ClientRoute::Login => "/login".into(),
            ClientRoute::RegisterAdmin => "/register-admin".into(),
            ClientRoute::RegisterTeam => "/register-team".into(),
            ClientRoute::Dashboard => "/".into(),
            ClientRoute::TeamDashboard => "/team-dashboard".into(),
            ClientRoute::JoinRequests => "/join-requests".into(),
            ClientRoute::Tournaments => "/tournaments".into(),
            ClientRoute::Teams => "/teams".into(),
            ClientRoute::Players => "/players".into(),
            ClientRoute::Bracket(id) => format!("/tournaments/{id}/bracket"),
            ClientRoute::TournamentRegistration => "/tournament-registration".into(),
        }
    }

    /// Reachable without signing in.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            ClientRoute::Login | ClientRoute::RegisterAdmin | ClientRoute::RegisterTeam
        )
    }
}

impl Serialize for ClientRoute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path())
    }
}

pub fn can_access(route: &ClientRoute, role: Role) -> bool {
    use ClientRoute::*;
    match route {
        Login | RegisterAdmin | RegisterTeam => true,
        Dashboard | JoinRequests => role == Role::Admin,
        TeamDashboard | TournamentRegistration => role == Role::Team,
        Tournaments | Teams | Players | Bracket(_) => true,
    }
}

/// Landing page after sign-in.
pub fn dashboard_route(role: Role) -> ClientRoute {
    match role {
        Role::Admin => ClientRoute::Dashboard,
        Role::Team => ClientRoute::TeamDashboard,
    }
}

/// Where a navigation to `route` ends up: the route itself when allowed, the login page
/// when signed out, otherwise the caller's dashboard.
pub fn resolve_route(route: ClientRoute, role: Option<Role>) -> ClientRoute {
    if route.is_public() {
        return route;
    }
    match role {
        None => ClientRoute::Login,
        Some(role) if can_access(&route, role) => route,
        Some(role) => dashboard_route(role),
    }
}
