//! Join-request workflow: a team asks to join, an administrator approves or rejects.

use crate::models::{
    RegistrationRequest, RegistrationStatus, Team, Tournament, TournamentError,
};
use chrono::NaiveDateTime;

/// Open a pending request for `team` to join `tournament`.
///
/// Refused when the team is already assigned, already has a pending request for this
/// tournament, the tournament is full, or its bracket has been generated.
pub fn request_to_join(
    tournament: &Tournament,
    team: Team,
    existing: &[RegistrationRequest],
    max_teams: usize,
    now: NaiveDateTime,
) -> Result<RegistrationRequest, TournamentError> {
    if tournament.has_bracket() {
        return Err(TournamentError::AlreadyGenerated);
    }
    if tournament.has_team(team.id) {
        return Err(TournamentError::TeamAlreadyAssigned(team.id));
    }
    if tournament.teams.len() >= max_teams {
        return Err(TournamentError::TeamLimitReached { max: max_teams });
    }
    let pending = existing
        .iter()
        .any(|r| r.is_pending() && r.team.id == team.id && r.tournament.id == tournament.id);
    if pending {
        return Err(TournamentError::RequestAlreadyPending);
    }
    Ok(RegistrationRequest::new(team, tournament.summary(), now))
}

/// Approve a pending request: the team is assigned to the tournament.
/// The request is left pending if the assignment fails.
pub fn approve_request(
    tournament: &mut Tournament,
    request: &mut RegistrationRequest,
    max_teams: usize,
    now: NaiveDateTime,
) -> Result<(), TournamentError> {
    if !request.is_pending() {
        return Err(TournamentError::RequestAlreadyDecided(request.id));
    }
    if request.tournament.id != tournament.id {
        return Err(TournamentError::RequestNotFound(request.id));
    }
    tournament.assign_team(request.team.clone(), max_teams)?;
    request.status = RegistrationStatus::Approved;
    request.response_date = Some(now);
    request.tournament = tournament.summary();
    log::info!(
        "Approved join request {}: team {} joins tournament {}",
        request.id,
        request.team.name,
        tournament.name
    );
    Ok(())
}

/// Reject a pending request with an explanation shown to the team.
pub fn reject_request(
    request: &mut RegistrationRequest,
    message: Option<String>,
    now: NaiveDateTime,
) -> Result<(), TournamentError> {
    if !request.is_pending() {
        return Err(TournamentError::RequestAlreadyDecided(request.id));
    }
    request.status = RegistrationStatus::Rejected;
    request.rejection_message = message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty());
    request.response_date = Some(now);
    log::info!("Rejected join request {} from team {}", request.id, request.team.name);
    Ok(())
}
