//! In-memory persistence for tournaments, teams, players, accounts and join requests.
//!
//! Every mutating method runs to completion under the caller's write lock, so each
//! operation is applied atomically.

use crate::logic::{self, WinnerOutcome};
use crate::models::{
    Bracket, GameMatch, MatchId, Player, PlayerId, RegistrationRequest, RegistrationRequestId,
    RegistrationStatus, Role, Team, TeamId, Tournament, TournamentError, TournamentId, User,
};
use chrono::NaiveDateTime;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Store {
    tournaments: HashMap<TournamentId, Tournament>,
    teams: HashMap<TeamId, Team>,
    players: HashMap<PlayerId, Player>,
    users: Vec<User>,
    requests: Vec<RegistrationRequest>,
    max_teams: usize,
}

impl Store {
    pub fn new(max_teams: usize) -> Self {
        Self {
            max_teams,
            ..Self::default()
        }
    }

    // Tournaments

    /// All tournaments, earliest start first.
    pub fn tournaments(&self) -> Vec<&Tournament> {
        let mut list: Vec<_> = self.tournaments.values().collect();
        list.sort_by(|a, b| (a.start_date, &a.name).cmp(&(b.start_date, &b.name)));
        list
    }

    pub fn tournament(&self, id: TournamentId) -> Result<&Tournament, TournamentError> {
        self.tournaments
            .get(&id)
            .ok_or(TournamentError::TournamentNotFound(id))
    }

    fn tournament_mut(&mut self, id: TournamentId) -> Result<&mut Tournament, TournamentError> {
        self.tournaments
            .get_mut(&id)
            .ok_or(TournamentError::TournamentNotFound(id))
    }

    pub fn insert_tournament(&mut self, tournament: Tournament) -> &Tournament {
        let id = tournament.id;
        log::info!("Created tournament {} ({})", tournament.name, id);
        self.tournaments.entry(id).or_insert(tournament)
    }

    /// Delete a tournament with its bracket and join requests.
    pub fn delete_tournament(&mut self, id: TournamentId) -> Result<Tournament, TournamentError> {
        let removed = self
            .tournaments
            .remove(&id)
            .ok_or(TournamentError::TournamentNotFound(id))?;
        self.requests.retain(|r| r.tournament.id != id);
        log::info!("Deleted tournament {} ({})", removed.name, id);
        Ok(removed)
    }

    pub fn tournament_teams(&self, id: TournamentId) -> Result<&[Team], TournamentError> {
        Ok(&self.tournament(id)?.teams)
    }

    pub fn assign_team(
        &mut self,
        id: TournamentId,
        team_id: TeamId,
    ) -> Result<&Tournament, TournamentError> {
        let team = self.team(team_id)?.clone();
        let max_teams = self.max_teams;
        let tournament = self.tournament_mut(id)?;
        tournament.assign_team(team, max_teams)?;
        Ok(&*tournament)
    }

    pub fn unassign_team(
        &mut self,
        id: TournamentId,
        team_id: TeamId,
    ) -> Result<&Tournament, TournamentError> {
        self.team(team_id)?;
        let tournament = self.tournament_mut(id)?;
        tournament.unassign_team(team_id)?;
        Ok(&*tournament)
    }

    // Bracket

    pub fn generate_bracket(&mut self, id: TournamentId) -> Result<&Bracket, TournamentError> {
        logic::generate_bracket(self.tournament_mut(id)?)
    }

    /// Matches ordered by round then match number; empty before generation.
    pub fn bracket_matches(&self, id: TournamentId) -> Result<&[GameMatch], TournamentError> {
        Ok(self
            .tournament(id)?
            .bracket
            .as_ref()
            .map_or(&[][..], Bracket::matches))
    }

    pub fn bracket(&self, id: TournamentId) -> Result<&Bracket, TournamentError> {
        self.tournament(id)?
            .bracket
            .as_ref()
            .ok_or(TournamentError::NotGenerated)
    }

    pub fn bracket_match(
        &self,
        id: TournamentId,
        match_id: MatchId,
    ) -> Result<&GameMatch, TournamentError> {
        self.bracket(id)?
            .get(match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))
    }

    pub fn record_winner(
        &mut self,
        id: TournamentId,
        match_id: MatchId,
        winner_team_id: TeamId,
    ) -> Result<WinnerOutcome, TournamentError> {
        logic::record_winner(self.tournament_mut(id)?, match_id, winner_team_id)
    }

    // Teams

    /// All teams by name.
    pub fn teams(&self) -> Vec<&Team> {
        let mut list: Vec<_> = self.teams.values().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        list
    }

    pub fn team(&self, id: TeamId) -> Result<&Team, TournamentError> {
        self.teams.get(&id).ok_or(TournamentError::TeamNotFound(id))
    }

    pub fn create_team(&mut self, team: Team) -> Result<&Team, TournamentError> {
        if team.name.trim().is_empty() {
            return Err(TournamentError::Invalid("Team name cannot be empty".into()));
        }
        let id = team.id;
        log::info!("Created team {} ({})", team.name, id);
        Ok(&*self.teams.entry(id).or_insert(team))
    }

    /// Delete a team. Refused while it sits in a generated bracket; otherwise it leaves every
    /// tournament, its players become free agents and its accounts lose the team link.
    pub fn delete_team(&mut self, id: TeamId) -> Result<Team, TournamentError> {
        self.team(id)?;
        if self
            .tournaments
            .values()
            .any(|t| t.has_bracket() && t.has_team(id))
        {
            return Err(TournamentError::TeamInBracket(id));
        }
        for tournament in self.tournaments.values_mut() {
            tournament.teams.retain(|t| t.id != id);
        }
        for player in self.players.values_mut().filter(|p| p.team_id == Some(id)) {
            player.team_id = None;
        }
        for user in self.users.iter_mut().filter(|u| u.team_id == Some(id)) {
            user.team_id = None;
        }
        self.requests.retain(|r| r.team.id != id);
        let removed = self.teams.remove(&id).ok_or(TournamentError::TeamNotFound(id))?;
        log::info!("Deleted team {} ({})", removed.name, id);
        Ok(removed)
    }

    // Players

    pub fn players(&self) -> Vec<&Player> {
        let mut list: Vec<_> = self.players.values().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        list
    }

    pub fn team_players(&self, team_id: TeamId) -> Result<Vec<&Player>, TournamentError> {
        self.team(team_id)?;
        Ok(self
            .players()
            .into_iter()
            .filter(|p| p.team_id == Some(team_id))
            .collect())
    }

    /// Add a player; its team, if any, must exist.
    pub fn create_player(&mut self, player: Player) -> Result<&Player, TournamentError> {
        if player.name.trim().is_empty() {
            return Err(TournamentError::Invalid("Player name cannot be empty".into()));
        }
        if let Some(team_id) = player.team_id {
            self.team(team_id)?;
        }
        Ok(&*self.players.entry(player.id).or_insert(player))
    }

    pub fn delete_player(&mut self, id: PlayerId) -> Result<Player, TournamentError> {
        self.players
            .remove(&id)
            .ok_or(TournamentError::PlayerNotFound(id))
    }

    /// Detach a player from its team without deleting it.
    pub fn remove_player_from_team(
        &mut self,
        team_id: TeamId,
        player_id: PlayerId,
    ) -> Result<&Player, TournamentError> {
        self.team(team_id)?;
        let player = self
            .players
            .get_mut(&player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        if player.team_id != Some(team_id) {
            return Err(TournamentError::PlayerNotOnTeam { player_id, team_id });
        }
        player.team_id = None;
        Ok(&*player)
    }

    // Accounts

    /// Case-insensitive lookup; surrounding whitespace is ignored.
    pub fn user(&self, username: &str) -> Option<&User> {
        let username = username.trim();
        self.users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
    }

    pub fn has_admin(&self) -> bool {
        self.users.iter().any(|u| u.role == Role::Admin)
    }

    /// Trimmed username, if it is non-empty and free.
    fn available_username(&self, username: &str) -> Result<String, TournamentError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(TournamentError::Invalid("Username cannot be empty".into()));
        }
        if self.user(username).is_some() {
            return Err(TournamentError::UsernameTaken);
        }
        Ok(username.to_string())
    }

    fn push_user(&mut self, user: User) -> &User {
        log::info!("Registered {:?} account {}", user.role, user.username);
        self.users.push(user);
        &self.users[self.users.len() - 1]
    }

    /// Add an account. Usernames are unique, case-insensitive, stored trimmed.
    pub fn insert_user(&mut self, mut user: User) -> Result<&User, TournamentError> {
        user.username = self.available_username(&user.username)?;
        Ok(self.push_user(user))
    }

    /// Create a team together with the account that manages it. Nothing is stored
    /// unless both are valid.
    pub fn register_team_account(
        &mut self,
        team: Team,
        username: &str,
        password_hash: String,
    ) -> Result<&User, TournamentError> {
        let username = self.available_username(username)?;
        let team_id = self.create_team(team)?.id;
        Ok(self.push_user(User::new(username, password_hash, Role::Team, Some(team_id))))
    }

    // Join requests

    /// All join requests, oldest first.
    pub fn requests(&self) -> &[RegistrationRequest] {
        &self.requests
    }

    pub fn tournament_requests(
        &self,
        id: TournamentId,
    ) -> Result<Vec<&RegistrationRequest>, TournamentError> {
        self.tournament(id)?;
        Ok(self.requests.iter().filter(|r| r.tournament.id == id).collect())
    }

    pub fn team_requests(&self, team_id: TeamId) -> Result<Vec<&RegistrationRequest>, TournamentError> {
        self.team(team_id)?;
        Ok(self.requests.iter().filter(|r| r.team.id == team_id).collect())
    }

    /// Approved requests of a team: the tournaments it plays in.
    pub fn active_tournaments(
        &self,
        team_id: TeamId,
    ) -> Result<Vec<&RegistrationRequest>, TournamentError> {
        Ok(self
            .team_requests(team_id)?
            .into_iter()
            .filter(|r| r.status == RegistrationStatus::Approved)
            .collect())
    }

    pub fn request_to_join(
        &mut self,
        id: TournamentId,
        team_id: TeamId,
        now: NaiveDateTime,
    ) -> Result<&RegistrationRequest, TournamentError> {
        let team = self.team(team_id)?.clone();
        let request =
            logic::request_to_join(self.tournament(id)?, team, &self.requests, self.max_teams, now)?;
        log::info!(
            "Team {} requested to join tournament {}",
            request.team.name,
            request.tournament.name
        );
        self.requests.push(request);
        Ok(&self.requests[self.requests.len() - 1])
    }

    fn request_index(
        &self,
        id: TournamentId,
        request_id: RegistrationRequestId,
    ) -> Result<usize, TournamentError> {
        self.requests
            .iter()
            .position(|r| r.id == request_id && r.tournament.id == id)
            .ok_or(TournamentError::RequestNotFound(request_id))
    }

    pub fn approve_request(
        &mut self,
        id: TournamentId,
        request_id: RegistrationRequestId,
        now: NaiveDateTime,
    ) -> Result<&RegistrationRequest, TournamentError> {
        let idx = self.request_index(id, request_id)?;
        let max_teams = self.max_teams;
        let tournament = self
            .tournaments
            .get_mut(&id)
            .ok_or(TournamentError::TournamentNotFound(id))?;
        let request = &mut self.requests[idx];
        logic::approve_request(tournament, request, max_teams, now)?;
        Ok(&*request)
    }

    pub fn reject_request(
        &mut self,
        id: TournamentId,
        request_id: RegistrationRequestId,
        message: Option<String>,
        now: NaiveDateTime,
    ) -> Result<&RegistrationRequest, TournamentError> {
        let idx = self.request_index(id, request_id)?;
        let request = &mut self.requests[idx];
        logic::reject_request(request, message, now)?;
        Ok(&*request)
    }
}
