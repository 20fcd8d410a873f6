//! The authenticated caller, passed explicitly to every operation that needs it.

use crate::auth::Claims;
use crate::logic::{can_access, dashboard_route, ClientRoute};
use crate::models::{Role, TeamId, TournamentError};
use serde::Serialize;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    pub role: Role,
    pub team_id: Option<TeamId>,
}

impl Session {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            username: claims.sub,
            role: claims.role,
            team_id: claims.team_id,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_admin(&self) -> Result<(), TournamentError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(TournamentError::Forbidden)
        }
    }

    /// Admins act for any team; team accounts only for their own.
    pub fn require_team(&self, team_id: TeamId) -> Result<(), TournamentError> {
        if self.is_admin() || self.team_id == Some(team_id) {
            Ok(())
        } else {
            Err(TournamentError::Forbidden)
        }
    }

    pub fn can_access(&self, route: &ClientRoute) -> bool {
        can_access(route, self.role)
    }

    pub fn dashboard(&self) -> ClientRoute {
        dashboard_route(self.role)
    }

    /// Static client routes this session may open.
    pub fn routes(&self) -> Vec<ClientRoute> {
        ClientRoute::STATIC
            .into_iter()
            .filter(|r| !r.is_public() && self.can_access(r))
            .collect()
    }
}
