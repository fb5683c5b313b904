//! Standings: recomputed from scratch from the recorded scores on every call.

use crate::models::{ByGroup, Fixture, GroupName, Score, Tournament};
use serde::Serialize;
use std::cmp::Ordering;

/// Win 3, draw 1, loss 0.
pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

/// One row of a ranked table.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Standing {
    /// 1-based position.
    pub rank: usize,
    pub team: String,
    pub games_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u64,
    pub goals_against: u64,
    pub goal_difference: i64,
    pub points: u32,
}

impl Standing {
    fn new(team: &str) -> Self {
        Self {
            team: team.to_string(),
            ..Self::default()
        }
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        self.games_played += 1;
        self.goals_for = self.goals_for.saturating_add(u64::from(scored));
        self.goals_against = self.goals_against.saturating_add(u64::from(conceded));
        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.points += POINTS_FOR_WIN;
                self.wins += 1;
            }
            Ordering::Less => self.losses += 1,
            Ordering::Equal => {
                self.points += POINTS_FOR_DRAW;
                self.draws += 1;
            }
        }
    }
}

/// `scored - conceded`, saturating at the `i64` bounds.
fn goal_difference(scored: u64, conceded: u64) -> i64 {
    if scored >= conceded {
        i64::try_from(scored - conceded).unwrap_or(i64::MAX)
    } else {
        i64::try_from(conceded - scored).map_or(i64::MIN, |d| -d)
    }
}

/// Ranked table for `teams` over `fixtures`.
///
/// Unplayed fixtures and fixtures naming a team outside `teams` are skipped.
/// Order: points, then goal difference, then goals scored, all descending;
/// remaining ties keep the order of `teams`.
pub fn compute_standings<S: AsRef<str>, F: Fixture>(teams: &[S], fixtures: &[F]) -> Vec<Standing> {
    let mut table: Vec<Standing> = teams.iter().map(|t| Standing::new(t.as_ref())).collect();

    for fixture in fixtures {
        let Score::Played { home, away } = fixture.score() else {
            continue;
        };
        let team1 = table.iter().position(|s| s.team == fixture.team1());
        let team2 = table.iter().position(|s| s.team == fixture.team2());
        let (Some(i), Some(j)) = (team1, team2) else {
            log::debug!(
                "Skipping {} vs {}: team not in this table",
                fixture.team1(),
                fixture.team2()
            );
            continue;
        };
        table[i].record(home, away);
        table[j].record(away, home);
    }

    for row in &mut table {
        row.goal_difference = goal_difference(row.goals_for, row.goals_against);
    }
    // sort_by is stable
    table.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_difference.cmp(&a.goal_difference))
            .then_with(|| b.goals_for.cmp(&a.goals_for))
    });
    for (i, row) in table.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    table
}

/// The tournament's table: one league table, or one per group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TournamentStandings {
    League { table: Vec<Standing> },
    Groups { groups: ByGroup<Vec<Standing>> },
}

impl TournamentStandings {
    /// Tables with their group, `None` for the league table.
    pub fn tables(&self) -> Vec<(Option<GroupName>, &[Standing])> {
        match self {
            TournamentStandings::League { table } => vec![(None, table.as_slice())],
            TournamentStandings::Groups { groups } => groups
                .iter()
                .map(|(name, table)| (Some(name), table.as_slice()))
                .collect(),
        }
    }
}

pub fn group_standings(tournament: &Tournament) -> ByGroup<Vec<Standing>> {
    ByGroup::new(
        compute_standings(&tournament.groups.a, &tournament.group_matches.a),
        compute_standings(&tournament.groups.b, &tournament.group_matches.b),
    )
}

pub fn league_standings(tournament: &Tournament) -> Vec<Standing> {
    compute_standings(&tournament.team_names(), &tournament.matches)
}

pub fn tournament_standings(tournament: &Tournament) -> TournamentStandings {
    if tournament.group_phase {
        TournamentStandings::Groups {
            groups: group_standings(tournament),
        }
    } else {
        TournamentStandings::League {
            table: league_standings(tournament),
        }
    }
}
