//! Roster types shared by both operations

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{FormError, Result};

/// FPL element id
pub type PlayerId = u32;

/// One row of the caller's player table.
///
/// Only `id` and `web_name` are interpreted; every other column is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub web_name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Player {
    pub fn new(id: PlayerId, web_name: impl Into<String>) -> Self {
        Self {
            id,
            web_name: web_name.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Attach an extra column
    pub fn with_column(mut self, name: &str, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(name.to_string(), value.into());
        self
    }
}

/// Ordered player table keyed by unique id
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Build a roster, rejecting duplicate ids
    pub fn new(players: Vec<Player>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(players.len());
        for player in &players {
            if !seen.insert(player.id) {
                return Err(FormError::DuplicatePlayer(player.id));
            }
        }
        Ok(Self { players })
    }

    /// Parse a JSON array of row objects
    pub fn from_json(json: &str) -> Result<Self> {
        let players: Vec<Player> = serde_json::from_str(json)?;
        Self::new(players)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Player> {
        self.players.iter()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Player;
    type IntoIter = std::slice::Iter<'a, Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.players.iter()
    }
}

/// A player whose history could not be fetched or decoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub player_id: PlayerId,
    pub reason: String,
}
