//! Snapshot: every tournament plus the currently selected one, persisted as one JSON file.

use crate::models::tournament::{Tournament, TournamentError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;
use std::path::Path;

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tournaments: BTreeMap<String, Tournament>,
    pub current_tournament: Option<String>,
}

impl Snapshot {
    /// Read a snapshot file. A missing file is an empty snapshot.
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                Self::from_json(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn tournament_names(&self) -> Vec<&str> {
        self.tournaments.keys().map(String::as_str).collect()
    }

    /// Create a tournament and make it the current one. Names must be unique.
    pub fn create_tournament(
        &mut self,
        name: impl Into<String>,
        date: NaiveDate,
        group_phase: bool,
    ) -> Result<&mut Tournament, TournamentError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(TournamentError::InvalidName);
        }
        if self.tournaments.contains_key(&name) {
            return Err(TournamentError::DuplicateTournamentName);
        }
        log::info!(
            "Created tournament '{}' on {} (group phase: {})",
            name,
            date,
            group_phase
        );
        self.current_tournament = Some(name.clone());
        Ok(self
            .tournaments
            .entry(name.clone())
            .or_insert_with(|| Tournament::new(name, date, group_phase)))
    }

    pub fn select_tournament(&mut self, name: &str) -> Result<(), TournamentError> {
        if !self.tournaments.contains_key(name) {
            return Err(TournamentError::TournamentNotFound(name.to_string()));
        }
        self.current_tournament = Some(name.to_string());
        Ok(())
    }

    pub fn current(&self) -> Result<&Tournament, TournamentError> {
        self.current_tournament
            .as_ref()
            .and_then(|name| self.tournaments.get(name))
            .ok_or(TournamentError::NoTournamentSelected)
    }

    pub fn current_mut(&mut self) -> Result<&mut Tournament, TournamentError> {
        let name = self
            .current_tournament
            .as_ref()
            .ok_or(TournamentError::NoTournamentSelected)?;
        self.tournaments
            .get_mut(name)
            .ok_or(TournamentError::NoTournamentSelected)
    }
}
