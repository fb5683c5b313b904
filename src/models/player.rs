//! Player and Team data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used by teams and lookups).
pub type PlayerId = Uuid;

/// A registered player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Avatar URL, if the organizer gave one.
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Player {
    /// Create a new player. An empty avatar is stored as `None`.
    pub fn new(name: impl Into<String>, avatar: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            avatar: avatar
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty()),
        }
    }
}

/// A doubles team of two distinct players.
///
/// Stats are not stored here; see [`crate::logic::compute_standings`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub player_ids: [PlayerId; 2],
    /// Player names at creation time, for display.
    pub players: [String; 2],
}

impl Team {
    pub fn new(name: impl Into<String>, first: &Player, second: &Player) -> Self {
        Self {
            name: name.into(),
            player_ids: [first.id, second.id],
            players: [first.name.clone(), second.name.clone()],
        }
    }

    pub fn has_player(&self, id: PlayerId) -> bool {
        self.player_ids.contains(&id)
    }
}
