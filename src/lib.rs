//! Foosball (Wuzzel) tournament tracker: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    bracket_state, compute_standings, final_placement, generate_schedule,
    generate_schedule_with_rng, group_standings, league_standings, record_score, reset_bracket,
    round_robin, seed_bracket, seed_from_groups, seed_from_table, set_bracket_score,
    set_match_score, standings_csv, tournament_standings, MatchRef, Standing, TournamentStandings,
    POINTS_FOR_DRAW, POINTS_FOR_WIN,
};
pub use models::{
    Bracket, BracketMatch, BracketRound, BracketState, ByGroup, Fixture, GroupName,
    KnockoutResult, Match, MatchOutcome, Placement, Player, PlayerId, Score, Side, Snapshot, Team,
    Tournament, TournamentError, MIN_TEAMS, UNSET_SCORE,
};
