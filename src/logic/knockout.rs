//! Knockout round: seeding from standings, scoring, and final placement.

use crate::logic::score::record_score;
use crate::logic::standings::{group_standings, league_standings, Standing};
use crate::models::{
    Bracket, BracketRound, BracketState, ByGroup, KnockoutResult, Placement, Tournament,
    TournamentError, MIN_TEAMS,
};

pub fn bracket_state(tournament: &Tournament) -> BracketState {
    tournament
        .ko_round
        .as_ref()
        .map_or(BracketState::Unseeded, Bracket::state)
}

/// Semi-finals from a single table: 1st vs 4th, 2nd vs 3rd.
pub fn seed_from_table(table: &[Standing]) -> Result<Bracket, TournamentError> {
    if table.len() < MIN_TEAMS {
        return Err(TournamentError::InsufficientTeams {
            required: MIN_TEAMS,
            found: table.len(),
        });
    }
    Ok(Bracket::new(
        (table[0].team.clone(), table[3].team.clone()),
        (table[1].team.clone(), table[2].team.clone()),
    ))
}

/// Semi-finals across groups: A1 vs B2, B1 vs A2.
pub fn seed_from_groups(groups: &ByGroup<Vec<Standing>>) -> Result<Bracket, TournamentError> {
    let (a, b) = (&groups.a, &groups.b);
    if a.len() < 2 || b.len() < 2 {
        return Err(TournamentError::InsufficientTeams {
            required: MIN_TEAMS,
            found: a.len().min(2) + b.len().min(2),
        });
    }
    Ok(Bracket::new(
        (a[0].team.clone(), b[1].team.clone()),
        (b[0].team.clone(), a[1].team.clone()),
    ))
}

/// Seed the knockout round from the current standings. Only valid while unseeded.
pub fn seed_bracket(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.ko_round.is_some() {
        return Err(TournamentError::BracketAlreadySeeded);
    }
    if tournament.teams.len() < MIN_TEAMS {
        return Err(TournamentError::InsufficientTeams {
            required: MIN_TEAMS,
            found: tournament.teams.len(),
        });
    }

    let bracket = if tournament.group_phase {
        seed_from_groups(&group_standings(tournament))?
    } else {
        seed_from_table(&league_standings(tournament))?
    };
    let [sf1, sf2] = &bracket.semifinals;
    log::info!(
        "Tournament '{}': knockout round seeded ({} vs {}, {} vs {})",
        tournament.name,
        sf1.team1,
        sf1.team2,
        sf2.team1,
        sf2.team2
    );
    tournament.ko_round = Some(bracket);
    Ok(())
}

/// Throw away the knockout round so it can be seeded again. Returns the discarded bracket.
pub fn reset_bracket(tournament: &mut Tournament) -> Option<Bracket> {
    let discarded = tournament.ko_round.take();
    if discarded.is_some() {
        log::info!("Tournament '{}': knockout round reset", tournament.name);
    }
    discarded
}

/// Enter a knockout score. `Ok(false)` means the text was malformed and ignored.
///
/// Semi-final results re-derive third place and final; a tie anywhere blocks progress.
pub fn set_bracket_score(
    tournament: &mut Tournament,
    round: BracketRound,
    raw: &str,
) -> Result<bool, TournamentError> {
    let bracket = tournament
        .ko_round
        .as_mut()
        .ok_or(TournamentError::BracketNotSeeded)?;
    let m = bracket
        .get_mut(round)
        .ok_or(TournamentError::BracketMatchUnavailable(round))?;
    if !record_score(&mut m.score, raw) {
        return Ok(false);
    }
    if m.result() == KnockoutResult::Tied {
        log::warn!(
            "Tournament '{}': {} tied {}, replay required",
            tournament.name,
            round,
            m.score
        );
    }

    if matches!(round, BracketRound::Semifinal1 | BracketRound::Semifinal2) {
        bracket.sync_finals();
    }
    if let Some(p) = bracket.placement() {
        log::info!(
            "Tournament '{}': 1st {}, 2nd {}, 3rd {}",
            tournament.name,
            p.first,
            p.second,
            p.third
        );
    }
    Ok(true)
}

/// Final placement. `Ok(None)` while matches are still to be played;
/// `UndecidedMatch` while a tied knockout match blocks the bracket.
pub fn final_placement(tournament: &Tournament) -> Result<Option<Placement>, TournamentError> {
    let bracket = tournament
        .ko_round
        .as_ref()
        .ok_or(TournamentError::BracketNotSeeded)?;
    if let Some(&round) = bracket.unresolved().first() {
        return Err(TournamentError::UndecidedMatch(round));
    }
    Ok(bracket.placement())
}
