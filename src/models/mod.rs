//! Data structures for the foosball tournament: players, teams, matches, bracket, snapshot.

mod bracket;
mod game;
mod player;
mod snapshot;
mod tournament;

pub use bracket::{Bracket, BracketMatch, BracketRound, BracketState, KnockoutResult, Placement};
pub use game::{ByGroup, Fixture, GroupName, Match, MatchOutcome, Score, Side, UNSET_SCORE};
pub use player::{Player, PlayerId, Team};
pub use snapshot::Snapshot;
pub use tournament::{Tournament, TournamentError, MIN_TEAMS};
