//! Tournament business logic: schedule, scores, standings, knockout round.

mod export;
mod knockout;
mod schedule;
mod score;
mod standings;

pub use export::standings_csv;
pub use knockout::{
    bracket_state, final_placement, reset_bracket, seed_bracket, seed_from_groups,
    seed_from_table, set_bracket_score,
};
pub use schedule::{generate_schedule, generate_schedule_with_rng, round_robin};
pub use score::{record_score, set_match_score, MatchRef};
pub use standings::{
    compute_standings, group_standings, league_standings, tournament_standings, Standing,
    TournamentStandings, POINTS_FOR_DRAW, POINTS_FOR_WIN,
};
