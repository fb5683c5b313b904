//! Match, Score, and group types for the round-robin phase.

use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text form of a score that has not been entered yet.
pub const UNSET_SCORE: &str = "-";

/// Which side of a match (team 1 plays red, team 2 plays blue).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

/// A match score: not yet played, or goals for team 1 and team 2.
///
/// Stored and exchanged as text: `"-"` or `"<home>:<away>"`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Score {
    #[default]
    Unset,
    Played { home: u32, away: u32 },
}

/// What a score means for the two teams.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchOutcome {
    Pending,
    Draw,
    Won(Side),
}

impl Score {
    /// Parse `"-"` or `"<int>:<int>"`. Surrounding whitespace is ignored on
    /// the whole string and on each side of the colon.
    ///
    /// Goals are unsigned 32-bit: negative counts and counts above `u32::MAX`
    /// are malformed.
    pub fn parse(raw: &str) -> Result<Self, TournamentError> {
        let raw = raw.trim();
        if raw == UNSET_SCORE {
            return Ok(Score::Unset);
        }
        let (home, away) = raw.split_once(':').ok_or(TournamentError::MalformedScore)?;
        let home = home
            .trim()
            .parse::<u32>()
            .map_err(|_| TournamentError::MalformedScore)?;
        let away = away
            .trim()
            .parse::<u32>()
            .map_err(|_| TournamentError::MalformedScore)?;
        Ok(Score::Played { home, away })
    }

    pub fn outcome(&self) -> MatchOutcome {
        match *self {
            Score::Unset => MatchOutcome::Pending,
            Score::Played { home, away } if home > away => MatchOutcome::Won(Side::One),
            Score::Played { home, away } if away > home => MatchOutcome::Won(Side::Two),
            Score::Played { .. } => MatchOutcome::Draw,
        }
    }

    /// A played score with a winner.
    pub fn is_decisive(&self) -> bool {
        matches!(self.outcome(), MatchOutcome::Won(_))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Unset => f.write_str(UNSET_SCORE),
            Score::Played { home, away } => write!(f, "{}:{}", home, away),
        }
    }
}

impl From<Score> for String {
    fn from(score: Score) -> Self {
        score.to_string()
    }
}

impl TryFrom<String> for Score {
    type Error = TournamentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Score::parse(&value)
    }
}

/// Anything with two named teams and a score that standings can aggregate over.
pub trait Fixture {
    fn team1(&self) -> &str;
    fn team2(&self) -> &str;
    fn score(&self) -> Score;
}

/// A scheduled round-robin match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// 1-based, unique within its schedule (or group).
    pub match_number: u32,
    pub team1: String,
    pub team2: String,
    pub score: Score,
    /// Table colours for the two teams.
    pub label: String,
}

impl Match {
    pub fn new(match_number: u32, team1: impl Into<String>, team2: impl Into<String>) -> Self {
        let team1 = team1.into();
        let team2 = team2.into();
        Self {
            match_number,
            label: format!("{} (red) vs {} (blue)", team1, team2),
            team1,
            team2,
            score: Score::Unset,
        }
    }
}

impl Fixture for Match {
    fn team1(&self) -> &str {
        &self.team1
    }

    fn team2(&self) -> &str {
        &self.team2
    }

    fn score(&self) -> Score {
        self.score
    }
}

/// One of the two round-robin pools in group mode.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum GroupName {
    A,
    B,
}

impl GroupName {
    pub const ALL: [GroupName; 2] = [GroupName::A, GroupName::B];
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupName::A => f.write_str("A"),
            GroupName::B => f.write_str("B"),
        }
    }
}

/// A value per group, persisted as `{"A": .., "B": ..}`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ByGroup<T> {
    #[serde(rename = "A")]
    pub a: T,
    #[serde(rename = "B")]
    pub b: T,
}

impl<T> ByGroup<T> {
    pub fn new(a: T, b: T) -> Self {
        Self { a, b }
    }

    pub fn get(&self, group: GroupName) -> &T {
        match group {
            GroupName::A => &self.a,
            GroupName::B => &self.b,
        }
    }

    pub fn get_mut(&mut self, group: GroupName) -> &mut T {
        match group {
            GroupName::A => &mut self.a,
            GroupName::B => &mut self.b,
        }
    }

    /// Both groups in A, B order.
    pub fn iter(&self) -> impl Iterator<Item = (GroupName, &T)> {
        [(GroupName::A, &self.a), (GroupName::B, &self.b)].into_iter()
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> ByGroup<U> {
        ByGroup {
            a: f(&self.a),
            b: f(&self.b),
        }
    }
}
