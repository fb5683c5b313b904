//! Knockout bracket: two semi-finals, then third place and final.

use crate::models::game::{Fixture, MatchOutcome, Score, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Round of a knockout match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketRound {
    Semifinal1,
    Semifinal2,
    ThirdPlace,
    Final,
}

impl fmt::Display for BracketRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BracketRound::Semifinal1 => "Semifinal 1",
            BracketRound::Semifinal2 => "Semifinal 2",
            BracketRound::ThirdPlace => "Third place",
            BracketRound::Final => "Final",
        };
        f.write_str(s)
    }
}

/// Where the bracket is in its lifecycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketState {
    /// No bracket yet.
    Unseeded,
    /// Semi-finals set, at least one without a winner.
    Seeded,
    /// Both semi-finals decided; third place and final pending.
    SemisDecided,
    /// Final and third place decided.
    Complete,
}

/// Result of a knockout match. A tie is not a result: the match has to be replayed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KnockoutResult<'a> {
    Pending,
    Tied,
    Decided { winner: &'a str, loser: &'a str },
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub round: BracketRound,
    pub team1: String,
    pub team2: String,
    pub score: Score,
}

impl BracketMatch {
    pub fn new(round: BracketRound, team1: impl Into<String>, team2: impl Into<String>) -> Self {
        Self {
            round,
            team1: team1.into(),
            team2: team2.into(),
            score: Score::Unset,
        }
    }

    pub fn result(&self) -> KnockoutResult<'_> {
        match self.score.outcome() {
            MatchOutcome::Pending => KnockoutResult::Pending,
            MatchOutcome::Draw => KnockoutResult::Tied,
            MatchOutcome::Won(Side::One) => KnockoutResult::Decided {
                winner: &self.team1,
                loser: &self.team2,
            },
            MatchOutcome::Won(Side::Two) => KnockoutResult::Decided {
                winner: &self.team2,
                loser: &self.team1,
            },
        }
    }
}

impl Fixture for BracketMatch {
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

/// Final top three.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub first: String,
    pub second: String,
    pub third: String,
}

/// The knockout stage. Third place and final exist only while both semi-finals have a winner.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub semifinals: [BracketMatch; 2],
    #[serde(default)]
    pub third_place: Option<BracketMatch>,
    #[serde(default, rename = "final")]
    pub final_match: Option<BracketMatch>,
}

impl Bracket {
    pub fn new(semifinal_1: (String, String), semifinal_2: (String, String)) -> Self {
        Self {
            semifinals: [
                BracketMatch::new(BracketRound::Semifinal1, semifinal_1.0, semifinal_1.1),
                BracketMatch::new(BracketRound::Semifinal2, semifinal_2.0, semifinal_2.1),
            ],
            third_place: None,
            final_match: None,
        }
    }

    pub fn get(&self, round: BracketRound) -> Option<&BracketMatch> {
        match round {
            BracketRound::Semifinal1 => Some(&self.semifinals[0]),
            BracketRound::Semifinal2 => Some(&self.semifinals[1]),
            BracketRound::ThirdPlace => self.third_place.as_ref(),
            BracketRound::Final => self.final_match.as_ref(),
        }
    }

    pub fn get_mut(&mut self, round: BracketRound) -> Option<&mut BracketMatch> {
        match round {
            BracketRound::Semifinal1 => Some(&mut self.semifinals[0]),
            BracketRound::Semifinal2 => Some(&mut self.semifinals[1]),
            BracketRound::ThirdPlace => self.third_place.as_mut(),
            BracketRound::Final => self.final_match.as_mut(),
        }
    }

    /// All existing knockout matches, semi-finals first.
    pub fn matches(&self) -> impl Iterator<Item = &BracketMatch> {
        self.semifinals
            .iter()
            .chain(self.third_place.iter())
            .chain(self.final_match.iter())
    }

    /// (winner, loser) of each semi-final, if both are decided.
    pub fn semifinal_results(&self) -> Option<[(&str, &str); 2]> {
        match (self.semifinals[0].result(), self.semifinals[1].result()) {
            (
                KnockoutResult::Decided { winner: w1, loser: l1 },
                KnockoutResult::Decided { winner: w2, loser: l2 },
            ) => Some([(w1, l1), (w2, l2)]),
            _ => None,
        }
    }

    pub fn state(&self) -> BracketState {
        if self.semifinal_results().is_none() {
            return BracketState::Seeded;
        }
        if self.placement().is_some() {
            BracketState::Complete
        } else {
            BracketState::SemisDecided
        }
    }

    /// Rounds whose entered score is a tie and must be replayed.
    pub fn unresolved(&self) -> Vec<BracketRound> {
        self.matches()
            .filter(|m| m.result() == KnockoutResult::Tied)
            .map(|m| m.round)
            .collect()
    }

    pub fn placement(&self) -> Option<Placement> {
        let final_match = self.final_match.as_ref()?;
        let third_place = self.third_place.as_ref()?;
        match (final_match.result(), third_place.result()) {
            (
                KnockoutResult::Decided { winner, loser },
                KnockoutResult::Decided { winner: third, .. },
            ) => Some(Placement {
                first: winner.to_string(),
                second: loser.to_string(),
                third: third.to_string(),
            }),
            _ => None,
        }
    }

    /// Re-derive third place and final from the semi-final results.
    /// A pairing that is still valid keeps its score.
    pub(crate) fn sync_finals(&mut self) {
        let pairings = self.semifinal_results().map(|[(w1, l1), (w2, l2)]| {
            (
                (l1.to_string(), l2.to_string()),
                (w1.to_string(), w2.to_string()),
            )
        });
        match pairings {
            Some((third, last)) => {
                self.third_place = Some(keep_or_replace(
                    self.third_place.take(),
                    BracketRound::ThirdPlace,
                    third,
                ));
                self.final_match = Some(keep_or_replace(
                    self.final_match.take(),
                    BracketRound::Final,
                    last,
                ));
            }
            None => {
                self.third_place = None;
                self.final_match = None;
            }
        }
    }
}

fn keep_or_replace(
    existing: Option<BracketMatch>,
    round: BracketRound,
    (team1, team2): (String, String),
) -> BracketMatch {
    match existing {
        Some(m) if m.team1 == team1 && m.team2 == team2 => m,
        _ => BracketMatch::new(round, team1, team2),
    }
}
