//! Integration tests for the knockout round.

mod common;

use common::{score_league, tournament_with_teams};
use wuzzel_tournament::{
    bracket_state, compute_standings, final_placement, generate_schedule, reset_bracket,
    seed_bracket, seed_from_groups, seed_from_table, set_bracket_score, set_match_score,
    BracketRound, BracketState, ByGroup, GroupName, Match, MatchRef, Placement, Score,
    Tournament, TournamentError,
};

/// League of T0..T3 finishing in that order.
fn seeded_league() -> Tournament {
    let mut t = tournament_with_teams(4, false);
    generate_schedule(&mut t).unwrap();
    score_league(&mut t, "T0", "T1", "5:0");
    score_league(&mut t, "T0", "T2", "5:0");
    score_league(&mut t, "T1", "T2", "3:0");
    score_league(&mut t, "T1", "T3", "3:0");
    score_league(&mut t, "T2", "T3", "1:0");
    seed_bracket(&mut t).unwrap();
    t
}

fn pairing(t: &Tournament, round: BracketRound) -> (String, String) {
    let m = t.ko_round.as_ref().unwrap().get(round).unwrap();
    (m.team1.clone(), m.team2.clone())
}

fn pair(a: &str, b: &str) -> (String, String) {
    (a.to_string(), b.to_string())
}

#[test]
fn seed_from_table_pairs_first_with_fourth() {
    let teams = ["A", "B", "C", "D", "E"];
    let matches: Vec<Match> = Vec::new();
    let table = compute_standings(&teams, &matches);
    let bracket = seed_from_table(&table).unwrap();
    assert_eq!(bracket.semifinals[0].team1, "A");
    assert_eq!(bracket.semifinals[0].team2, "D");
    assert_eq!(bracket.semifinals[1].team1, "B");
    assert_eq!(bracket.semifinals[1].team2, "C");
    assert_eq!(bracket.state(), BracketState::Seeded);
}

#[test]
fn seed_from_groups_crosses_groups() {
    let groups = ByGroup::new(
        compute_standings::<_, Match>(&["A1", "A2"], &[]),
        compute_standings::<_, Match>(&["B1", "B2"], &[]),
    );
    let bracket = seed_from_groups(&groups).unwrap();
    assert_eq!(bracket.semifinals[0].team1, "A1");
    assert_eq!(bracket.semifinals[0].team2, "B2");
    assert_eq!(bracket.semifinals[1].team1, "B1");
    assert_eq!(bracket.semifinals[1].team2, "A2");
}

#[test]
fn seed_from_groups_needs_two_per_group() {
    let groups = ByGroup::new(
        compute_standings::<_, Match>(&["A1", "A2", "A3"], &[]),
        compute_standings::<_, Match>(&["B1"], &[]),
    );
    assert!(matches!(
        seed_from_groups(&groups),
        Err(TournamentError::InsufficientTeams { .. })
    ));
}

#[test]
fn seed_requires_four_teams() {
    let mut t = tournament_with_teams(3, false);
    assert_eq!(
        seed_bracket(&mut t),
        Err(TournamentError::InsufficientTeams {
            required: 4,
            found: 3
        })
    );
    assert_eq!(bracket_state(&t), BracketState::Unseeded);
}

#[test]
fn seed_league_bracket_from_standings() {
    let t = seeded_league();
    assert_eq!(bracket_state(&t), BracketState::Seeded);
    assert_eq!(pairing(&t, BracketRound::Semifinal1), pair("T0", "T3"));
    assert_eq!(pairing(&t, BracketRound::Semifinal2), pair("T1", "T2"));
    let bracket = t.ko_round.as_ref().unwrap();
    assert!(bracket.third_place.is_none() && bracket.final_match.is_none());
}

#[test]
fn seed_group_bracket_from_group_standings() {
    let mut t = tournament_with_teams(4, true);
    generate_schedule(&mut t).unwrap();
    // group winner is team1 of match 1 in each group
    set_match_score(&mut t, MatchRef::Group(GroupName::A, 1), "3:0").unwrap();
    set_match_score(&mut t, MatchRef::Group(GroupName::B, 1), "3:0").unwrap();
    let a1 = t.group_matches.a[0].team1.clone();
    let a2 = t.group_matches.a[0].team2.clone();
    let b1 = t.group_matches.b[0].team1.clone();
    let b2 = t.group_matches.b[0].team2.clone();

    seed_bracket(&mut t).unwrap();
    assert_eq!(pairing(&t, BracketRound::Semifinal1), (a1, b2));
    assert_eq!(pairing(&t, BracketRound::Semifinal2), (b1, a2));
}

#[test]
fn group_bracket_before_groups_exist_is_rejected() {
    let mut t = tournament_with_teams(4, true);
    assert!(matches!(
        seed_bracket(&mut t),
        Err(TournamentError::InsufficientTeams { .. })
    ));
    assert!(t.ko_round.is_none());
}

#[test]
fn reseeding_requires_an_explicit_reset() {
    let mut t = seeded_league();
    set_bracket_score(&mut t, BracketRound::Semifinal1, "2:1").unwrap();
    let before = t.ko_round.clone();

    assert_eq!(seed_bracket(&mut t), Err(TournamentError::BracketAlreadySeeded));
    assert_eq!(t.ko_round, before);

    assert!(reset_bracket(&mut t).is_some());
    assert_eq!(bracket_state(&t), BracketState::Unseeded);
    seed_bracket(&mut t).unwrap();
    assert_eq!(
        t.ko_round.as_ref().unwrap().semifinals[0].score,
        Score::Unset
    );
}

#[test]
fn scoring_before_seeding_is_rejected() {
    let mut t = tournament_with_teams(4, false);
    assert_eq!(
        set_bracket_score(&mut t, BracketRound::Semifinal1, "1:0"),
        Err(TournamentError::BracketNotSeeded)
    );
    assert_eq!(final_placement(&t), Err(TournamentError::BracketNotSeeded));
}

#[test]
fn third_place_and_final_wait_for_both_semis() {
    let mut t = seeded_league();
    assert_eq!(
        set_bracket_score(&mut t, BracketRound::Final, "1:0"),
        Err(TournamentError::BracketMatchUnavailable(BracketRound::Final))
    );

    set_bracket_score(&mut t, BracketRound::Semifinal1, "3:2").unwrap();
    assert_eq!(bracket_state(&t), BracketState::Seeded);
    assert_eq!(
        set_bracket_score(&mut t, BracketRound::ThirdPlace, "1:0"),
        Err(TournamentError::BracketMatchUnavailable(BracketRound::ThirdPlace))
    );

    set_bracket_score(&mut t, BracketRound::Semifinal2, "0:4").unwrap();
    assert_eq!(bracket_state(&t), BracketState::SemisDecided);
    assert_eq!(pairing(&t, BracketRound::Final), pair("T0", "T2"));
    assert_eq!(pairing(&t, BracketRound::ThirdPlace), pair("T3", "T1"));
    assert_eq!(final_placement(&t), Ok(None));
}

#[test]
fn tied_semifinal_blocks_progress_until_rescored() {
    let mut t = seeded_league();
    set_bracket_score(&mut t, BracketRound::Semifinal1, "2:0").unwrap();
    assert_eq!(set_bracket_score(&mut t, BracketRound::Semifinal2, "2:2"), Ok(true));

    assert_eq!(bracket_state(&t), BracketState::Seeded);
    let bracket = t.ko_round.as_ref().unwrap();
    assert!(bracket.final_match.is_none());
    assert_eq!(bracket.unresolved(), vec![BracketRound::Semifinal2]);
    assert_eq!(
        final_placement(&t),
        Err(TournamentError::UndecidedMatch(BracketRound::Semifinal2))
    );

    set_bracket_score(&mut t, BracketRound::Semifinal2, "3:2").unwrap();
    assert_eq!(bracket_state(&t), BracketState::SemisDecided);
    assert!(t.ko_round.as_ref().unwrap().unresolved().is_empty());
}

#[test]
fn complete_bracket_yields_placement() {
    let mut t = seeded_league();
    set_bracket_score(&mut t, BracketRound::Semifinal1, "5:3").unwrap();
    set_bracket_score(&mut t, BracketRound::Semifinal2, "1:2").unwrap();
    set_bracket_score(&mut t, BracketRound::ThirdPlace, "4:1").unwrap();
    assert_eq!(bracket_state(&t), BracketState::SemisDecided);
    set_bracket_score(&mut t, BracketRound::Final, "0:3").unwrap();

    assert_eq!(bracket_state(&t), BracketState::Complete);
    assert_eq!(
        final_placement(&t),
        Ok(Some(Placement {
            first: "T2".to_string(),
            second: "T0".to_string(),
            third: "T3".to_string(),
        }))
    );
}

#[test]
fn tied_final_is_reported_not_guessed() {
    let mut t = seeded_league();
    set_bracket_score(&mut t, BracketRound::Semifinal1, "1:0").unwrap();
    set_bracket_score(&mut t, BracketRound::Semifinal2, "1:0").unwrap();
    set_bracket_score(&mut t, BracketRound::ThirdPlace, "2:0").unwrap();
    set_bracket_score(&mut t, BracketRound::Final, "3:3").unwrap();

    assert_eq!(bracket_state(&t), BracketState::SemisDecided);
    assert_eq!(
        final_placement(&t),
        Err(TournamentError::UndecidedMatch(BracketRound::Final))
    );
}

#[test]
fn malformed_knockout_score_is_ignored() {
    let mut t = seeded_league();
    set_bracket_score(&mut t, BracketRound::Semifinal1, "2:1").unwrap();
    assert_eq!(
        set_bracket_score(&mut t, BracketRound::Semifinal1, "abc"),
        Ok(false)
    );
    assert_eq!(
        t.ko_round.as_ref().unwrap().semifinals[0].score,
        Score::Played { home: 2, away: 1 }
    );
}

#[test]
fn changing_a_semifinal_winner_resets_the_affected_pairings() {
    let mut t = seeded_league();
    set_bracket_score(&mut t, BracketRound::Semifinal1, "2:0").unwrap();
    set_bracket_score(&mut t, BracketRound::Semifinal2, "2:0").unwrap();
    set_bracket_score(&mut t, BracketRound::Final, "1:0").unwrap();
    set_bracket_score(&mut t, BracketRound::ThirdPlace, "1:0").unwrap();
    assert_eq!(bracket_state(&t), BracketState::Complete);

    // same winner, different score: pairings and their scores stay
    set_bracket_score(&mut t, BracketRound::Semifinal1, "3:0").unwrap();
    assert_eq!(bracket_state(&t), BracketState::Complete);

    // winner flips: final and third place are new matches
    set_bracket_score(&mut t, BracketRound::Semifinal1, "0:1").unwrap();
    assert_eq!(pairing(&t, BracketRound::Final), pair("T3", "T1"));
    assert_eq!(pairing(&t, BracketRound::ThirdPlace), pair("T0", "T2"));
    let bracket = t.ko_round.as_ref().unwrap();
    assert_eq!(bracket.final_match.as_ref().unwrap().score, Score::Unset);
    assert_eq!(bracket_state(&t), BracketState::SemisDecided);

    // back to unset: third place and final disappear
    set_bracket_score(&mut t, BracketRound::Semifinal2, "-").unwrap();
    assert_eq!(bracket_state(&t), BracketState::Seeded);
    assert!(t.ko_round.as_ref().unwrap().final_match.is_none());
}
