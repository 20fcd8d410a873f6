//! Single-elimination bracket: generation from a team list and winner propagation.

use crate::models::{
    Bracket, GameMatch, MatchId, MatchStatus, Slot, Team, TeamId, Tournament, TournamentError,
    TournamentStatus,
};
use serde::Serialize;
use std::collections::HashSet;

/// Result of recording a winner: the resolved match plus what it unlocked.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerOutcome {
    /// The match, now completed.
    pub completed: GameMatch,
    /// Next-round match after the winner was placed in its slot. None for the final.
    pub next: Option<GameMatch>,
    /// Set when the final was recorded.
    pub champion: Option<Team>,
}

/// Lay out a bracket for `teams` in the given order.
///
/// 1. Round 1: `ceil(n/2)` matches, match k gets teams 2k and 2k+1 (team 2 absent on a bye).
/// 2. Each later round has `ceil(prev/2)` matches with both slots TBD, down to a single match.
/// 3. Match numbers restart at 1 in each round; match m of round r is fed by matches
///    2m-1 (team 1) and 2m (team 2) of round r-1.
pub fn build_bracket(teams: &[Team]) -> Result<Bracket, TournamentError> {
    if teams.is_empty() {
        return Err(TournamentError::NoTeams);
    }
    let mut seen = HashSet::with_capacity(teams.len());
    if let Some(dup) = teams.iter().find(|t| !seen.insert(t.id)) {
        return Err(TournamentError::TeamAlreadyAssigned(dup.id));
    }

    let mut matches: Vec<GameMatch> = teams
        .chunks(2)
        .zip(1..)
        .map(|(pair, number)| GameMatch::new(1, number, Some(pair[0].clone()), pair.get(1).cloned()))
        .collect();

    let mut round = 1;
    let mut round_size = matches.len() as u32;
    while round_size > 1 {
        round += 1;
        round_size = round_size.div_ceil(2);
        matches.extend((1..=round_size).map(|number| GameMatch::new(round, number, None, None)));
    }

    Ok(Bracket::from_matches(matches))
}

/// Generate the tournament's bracket from its assigned teams (insertion order).
/// Fails with `AlreadyGenerated` if any match exists.
pub fn generate_bracket(tournament: &mut Tournament) -> Result<&Bracket, TournamentError> {
    if tournament.has_bracket() {
        return Err(TournamentError::AlreadyGenerated);
    }
    let bracket = build_bracket(&tournament.teams)?;
    log::info!(
        "Generated bracket for tournament {} ({} teams, {} rounds, {} matches)",
        tournament.id,
        tournament.teams.len(),
        bracket.round_count(),
        bracket.matches().len()
    );
    tournament.status = TournamentStatus::Ongoing;
    Ok(&*tournament.bracket.insert(bracket))
}

/// An empty slot with no feeding match: the other team plays nobody.
fn is_bye(bracket: &Bracket, m: &GameMatch, slot: Slot) -> bool {
    m.slot(slot).is_none() && bracket.feeder(m.round, m.match_number, slot).is_none()
}

/// A match can be resolved when it is scheduled, has at least one team, and every
/// empty slot is a bye rather than waiting on an unresolved feeder.
fn check_schedulable(bracket: &Bracket, m: &GameMatch) -> Result<(), TournamentError> {
    let has_team = m.team1.is_some() || m.team2.is_some();
    let waiting = [Slot::Team1, Slot::Team2]
        .into_iter()
        .any(|slot| m.slot(slot).is_none() && !is_bye(bracket, m, slot));
    if m.is_completed() || !has_team || waiting {
        return Err(TournamentError::MatchNotSchedulable(m.id));
    }
    Ok(())
}

/// Record `winner_team_id` as the winner of `match_id` and place it in the next round.
///
/// The winner of match m in round r fills slot team 1 (m odd) or team 2 (m even) of match
/// `ceil(m/2)` in round r+1. Recording the final completes the tournament. A rejected call
/// leaves the bracket untouched.
pub fn record_winner(
    tournament: &mut Tournament,
    match_id: MatchId,
    winner_team_id: TeamId,
) -> Result<WinnerOutcome, TournamentError> {
    let bracket = tournament
        .bracket
        .as_mut()
        .ok_or(TournamentError::NotGenerated)?;
    let current = bracket
        .get(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    check_schedulable(bracket, current)?;
    let winner = current
        .participant(winner_team_id)
        .cloned()
        .ok_or(TournamentError::InvalidWinner {
            match_id,
            team_id: winner_team_id,
        })?;
    let (round, number) = (current.round, current.match_number);

    let current = bracket
        .get_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    current.status = MatchStatus::Completed;
    current.winner = Some(winner.clone());
    let completed = current.clone();

    let next = bracket.at_mut(round + 1, number.div_ceil(2)).map(|next| {
        next.set_slot(Slot::fed_by(number), winner.clone());
        next.clone()
    });

    let champion = match next {
        Some(_) => None,
        None => Some(winner),
    };
    log::info!(
        "Tournament {}: round {} match {} won by {}",
        tournament.id,
        round,
        number,
        completed.winner.as_ref().map_or("?", |t| t.name.as_str())
    );
    if let Some(champion) = &champion {
        log::info!("Tournament {} completed, champion {}", tournament.id, champion.name);
        tournament.status = TournamentStatus::Completed;
    }

    Ok(WinnerOutcome {
        completed,
        next,
        champion,
    })
}

/// Matches of one round ordered by match number. Display helper; no side effects.
pub fn query_round(bracket: &Bracket, round: u32) -> Vec<&GameMatch> {
    bracket.round(round).collect()
}
