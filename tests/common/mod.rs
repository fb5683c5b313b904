//! Shared helpers for integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use wuzzel_tournament::{set_match_score, MatchRef, Tournament};

pub fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
}

/// Tournament with `n` teams named T0..Tn-1, two fresh players each.
pub fn tournament_with_teams(n: usize, group_phase: bool) -> Tournament {
    let mut t = Tournament::new("Cup", date(), group_phase);
    for i in 0..n {
        let p1 = t.add_player(format!("P{i}a"), None).unwrap();
        let p2 = t.add_player(format!("P{i}b"), None).unwrap();
        t.create_team(format!("T{i}"), p1, p2).unwrap();
    }
    t
}

/// Score the league match between `team1` and `team2` (in that colour order).
pub fn score_league(t: &mut Tournament, team1: &str, team2: &str, score: &str) {
    let number = t
        .matches
        .iter()
        .find(|m| m.team1 == team1 && m.team2 == team2)
        .map(|m| m.match_number)
        .unwrap();
    assert!(set_match_score(t, MatchRef::League(number), score).unwrap());
}
