//! CSV export of the standings tables.

use crate::logic::standings::TournamentStandings;
use serde::Serialize;

#[derive(Serialize)]
struct CsvRow<'a> {
    group: String,
    rank: usize,
    team: &'a str,
    games_played: u32,
    wins: u32,
    draws: u32,
    losses: u32,
    goals: String,
    goal_difference: i64,
    points: u32,
}

/// All tables as one CSV document with a header row. `group` is empty in league mode.
pub fn standings_csv(standings: &TournamentStandings) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for (group, table) in standings.tables() {
        let group = group.map(|g| g.to_string()).unwrap_or_default();
        for row in table {
            writer.serialize(CsvRow {
                group: group.clone(),
                rank: row.rank,
                team: &row.team,
                games_played: row.games_played,
                wins: row.wins,
                draws: row.draws,
                losses: row.losses,
                goals: format!("{}:{}", row.goals_for, row.goals_against),
                goal_difference: row.goal_difference,
                points: row.points,
            })?;
        }
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}
