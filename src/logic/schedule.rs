//! Schedule generation: double round-robin, optionally split into two groups.

use crate::models::{ByGroup, Match, Tournament, TournamentError, MIN_TEAMS};
use rand::seq::SliceRandom;
use rand::Rng;

/// Every pair of teams plays twice with colours swapped.
///
/// For each pair (i, j) with i before j: first (i, j), then (j, i).
/// Match numbers run from 1 in that order; n teams give n·(n−1) matches.
pub fn round_robin<S: AsRef<str>>(teams: &[S]) -> Vec<Match> {
    let n = teams.len();
    let mut matches = Vec::with_capacity(n * n.saturating_sub(1));
    let mut match_number = 1;
    for i in 0..n {
        for j in (i + 1)..n {
            for (home, away) in [(i, j), (j, i)] {
                matches.push(Match::new(
                    match_number,
                    teams[home].as_ref(),
                    teams[away].as_ref(),
                ));
                match_number += 1;
            }
        }
    }
    matches
}

/// Generate the tournament's schedule once, shuffling group membership with the thread RNG.
pub fn generate_schedule(tournament: &mut Tournament) -> Result<(), TournamentError> {
    generate_schedule_with_rng(tournament, &mut rand::thread_rng())
}

/// Generate the tournament's schedule once.
///
/// 1. Require at least 4 teams and no existing schedule (no state change otherwise).
/// 2. League mode: one double round-robin over all teams, in registration order.
/// 3. Group mode: shuffle the teams, first half is group A, rest is group B;
///    a double round-robin per group, numbering restarting at 1.
pub fn generate_schedule_with_rng<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if tournament.teams.len() < MIN_TEAMS {
        return Err(TournamentError::InsufficientTeams {
            required: MIN_TEAMS,
            found: tournament.teams.len(),
        });
    }
    if tournament.has_schedule() {
        return Err(TournamentError::ScheduleAlreadyGenerated);
    }

    if tournament.group_phase {
        let mut group_a: Vec<String> = tournament.teams.iter().map(|t| t.name.clone()).collect();
        group_a.shuffle(rng);
        let group_b = group_a.split_off(group_a.len() / 2);
        let groups = ByGroup::new(group_a, group_b);

        tournament.group_matches = groups.map(|teams| round_robin(teams));
        tournament.groups = groups;
        log::info!(
            "Tournament '{}': generated group schedule (A: {} matches, B: {} matches)",
            tournament.name,
            tournament.group_matches.a.len(),
            tournament.group_matches.b.len()
        );
    } else {
        let matches = round_robin(&tournament.team_names());
        tournament.matches = matches;
        log::info!(
            "Tournament '{}': generated schedule with {} matches",
            tournament.name,
            tournament.matches.len()
        );
    }
    Ok(())
}
