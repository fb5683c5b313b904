//! Score entry. Malformed input keeps the previous score.

use crate::models::{GroupName, Score, Tournament, TournamentError};

/// Addresses a round-robin match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchRef {
    /// League schedule, by match number.
    League(u32),
    /// Group schedule, by group and match number.
    Group(GroupName, u32),
}

/// Overwrite `score` with the parsed `raw` text. Returns false (and leaves `score` alone) if malformed.
pub fn record_score(score: &mut Score, raw: &str) -> bool {
    match Score::parse(raw) {
        Ok(parsed) => {
            *score = parsed;
            true
        }
        Err(_) => {
            log::debug!("Ignoring malformed score {:?}; keeping {}", raw, score);
            false
        }
    }
}

/// Enter a score for a scheduled match. `Ok(false)` means the text was malformed and ignored.
pub fn set_match_score(
    tournament: &mut Tournament,
    match_ref: MatchRef,
    raw: &str,
) -> Result<bool, TournamentError> {
    let (matches, match_number) = match match_ref {
        MatchRef::League(number) => (&mut tournament.matches, number),
        MatchRef::Group(group, number) => (tournament.group_matches.get_mut(group), number),
    };
    let m = matches
        .iter_mut()
        .find(|m| m.match_number == match_number)
        .ok_or(TournamentError::MatchNotFound)?;
    Ok(record_score(&mut m.score, raw))
}
