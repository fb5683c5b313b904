//! Integration tests for score entry.

mod common;

use common::tournament_with_teams;
use wuzzel_tournament::{
    generate_schedule, record_score, set_match_score, GroupName, MatchOutcome, MatchRef, Score,
    Side, TournamentError,
};

#[test]
fn parse_accepts_unset_and_goal_pairs() {
    assert_eq!(Score::parse("-"), Ok(Score::Unset));
    assert_eq!(Score::parse(" 3:1 "), Ok(Score::Played { home: 3, away: 1 }));
    assert_eq!(Score::parse("10 : 0"), Ok(Score::Played { home: 10, away: 0 }));
    assert_eq!(Score::parse("2:2"), Ok(Score::Played { home: 2, away: 2 }));
    assert_eq!(
        Score::parse("4294967295:0"),
        Ok(Score::Played { home: u32::MAX, away: 0 })
    );
}

#[test]
fn parse_rejects_malformed_text() {
    for raw in ["abc", "3-1", "", "3:", ":1", "1:2:3", "-1:2", "x:1", "99999999999:0"] {
        assert_eq!(Score::parse(raw), Err(TournamentError::MalformedScore), "{raw:?}");
    }
}

#[test]
fn outcome_and_text_form() {
    assert_eq!(Score::Unset.outcome(), MatchOutcome::Pending);
    assert_eq!(
        Score::Played { home: 3, away: 1 }.outcome(),
        MatchOutcome::Won(Side::One)
    );
    assert_eq!(
        Score::Played { home: 0, away: 5 }.outcome(),
        MatchOutcome::Won(Side::Two)
    );
    assert_eq!(Score::Played { home: 2, away: 2 }.outcome(), MatchOutcome::Draw);
    assert!(!Score::Played { home: 2, away: 2 }.is_decisive());
    assert_eq!(Score::Played { home: 3, away: 1 }.to_string(), "3:1");
    assert_eq!(Score::Unset.to_string(), "-");
}

#[test]
fn malformed_score_keeps_previous_value() {
    let mut score = Score::Played { home: 4, away: 2 };
    for raw in ["abc", "3-1", ""] {
        assert!(!record_score(&mut score, raw));
        assert_eq!(score, Score::Played { home: 4, away: 2 });
    }
    assert!(record_score(&mut score, "-"));
    assert_eq!(score, Score::Unset);
}

#[test]
fn set_league_match_score() {
    let mut t = tournament_with_teams(4, false);
    generate_schedule(&mut t).unwrap();

    assert_eq!(set_match_score(&mut t, MatchRef::League(3), "5:4"), Ok(true));
    assert_eq!(t.matches[2].score, Score::Played { home: 5, away: 4 });

    assert_eq!(set_match_score(&mut t, MatchRef::League(3), "5-4"), Ok(false));
    assert_eq!(t.matches[2].score, Score::Played { home: 5, away: 4 });

    assert_eq!(
        set_match_score(&mut t, MatchRef::League(99), "1:0"),
        Err(TournamentError::MatchNotFound)
    );
}

#[test]
fn set_group_match_score() {
    let mut t = tournament_with_teams(4, true);
    generate_schedule(&mut t).unwrap();

    assert_eq!(
        set_match_score(&mut t, MatchRef::Group(GroupName::B, 2), "0:1"),
        Ok(true)
    );
    assert_eq!(t.group_matches.b[1].score, Score::Played { home: 0, away: 1 });
    assert_eq!(t.group_matches.a[1].score, Score::Unset);
    assert_eq!(
        set_match_score(&mut t, MatchRef::Group(GroupName::A, 3), "1:0"),
        Err(TournamentError::MatchNotFound)
    );
}
