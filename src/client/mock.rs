//! In-memory history source
//!
//! Serves canned histories without network calls, for:
//! - Unit tests with controlled responses
//! - Dry runs over a saved roster

use crate::error::{FormError, Result};
use crate::history::HistoryEntry;
use crate::types::PlayerId;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

use super::HistorySource;

/// History source backed by a map. Unknown players have an empty history.
#[derive(Default)]
pub struct StaticHistorySource {
    histories: HashMap<PlayerId, Vec<HistoryEntry>>,
    failing: HashSet<PlayerId>,
    calls: Mutex<Vec<PlayerId>>,
}

impl StaticHistorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(mut self, player_id: PlayerId, history: Vec<HistoryEntry>) -> Self {
        self.histories.insert(player_id, history);
        self
    }

    /// Make every fetch for `player_id` fail with a simulated network error
    pub fn with_failure(mut self, player_id: PlayerId) -> Self {
        self.failing.insert(player_id);
        self
    }

    /// Player ids requested so far, in request order
    pub fn calls(&self) -> Vec<PlayerId> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl HistorySource for StaticHistorySource {
    async fn fetch_history(&self, player_id: PlayerId) -> Result<Vec<HistoryEntry>> {
        self.calls.lock().push(player_id);

        if self.failing.contains(&player_id) {
            return Err(FormError::Internal(format!(
                "simulated network failure for player {}",
                player_id
            )));
        }

        Ok(self.histories.get(&player_id).cloned().unwrap_or_default())
    }
}
