//! Recent transfer activity
//!
//! Sums transfers in and out over each player's last N matches into a new table,
//! one row per roster player in roster order.


use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::client::{history_stream, HistorySource};
use crate::config::{FailurePolicy, TransferSettings};
use crate::error::{FormError, Result};
use crate::history::{recent_window, TransferTotals};
use crate::types::{FetchFailure, PlayerId, Roster};

/// One output row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSummary {
    pub id: PlayerId,
    pub web_name: String,
    pub transfers_in: i64,
    pub transfers_out: i64,
    pub total_transfers: i64,
}

impl TransferSummary {
    fn new(id: PlayerId, web_name: &str, totals: TransferTotals) -> Self {
        Self {
            id,
            web_name: web_name.to_string(),
            transfers_in: totals.transfers_in,
            transfers_out: totals.transfers_out,
            total_transfers: totals.total,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TransferTable {
    pub rows: Vec<TransferSummary>,
    pub failures: Vec<FetchFailure>,
}

impl TransferTable {
    pub fn get(&self, id: PlayerId) -> Option<&TransferSummary> {
        self.rows.iter().find(|r| r.id == id)
    }
}

/// Sum transfers over the last `settings.window` matches for every roster player.
///
/// A player fails when the fetch fails, the body does not decode, or the sums overflow.
/// With `FailurePolicy::Abort` the first failure ends the run and is returned;
/// with `FailurePolicy::Isolate` the player gets a zero row and the run continues.
/// Non-2xx responses count as fetch failures, so a missing player also aborts.
pub async fn recent_transfers<S>(
    source: &S,
    roster: &Roster,
    settings: &TransferSettings,
) -> Result<TransferTable>
where
    S: HistorySource + ?Sized,
{
    if settings.window == 0 {
        return Err(FormError::InvalidWindow(settings.window));
    }

    info!(
        players = roster.len(),
        window = settings.window,
        policy = ?settings.on_error,
        "Computing recent transfers"
    );

    let mut table = TransferTable {
        rows: Vec::with_capacity(roster.len()),
        failures: Vec::new(),
    };

    let mut results = std::pin::pin!(history_stream(source, roster.ids(), settings.concurrency));
    for player in roster {
        let Some((id, result)) = results.next().await else {
            return Err(FormError::Internal(format!(
                "history stream ended before player {}",
                player.id
            )));
        };
        debug_assert_eq!(id, player.id);

        let totals = result.and_then(|history| {
            TransferTotals::from_window(recent_window(&history, settings.window))
        });
        let totals = match totals {
            Ok(totals) => totals,
            Err(e) if settings.on_error == FailurePolicy::Abort => {
                warn!(player_id = id, error = %e, "Transfers unavailable, aborting run");
                return Err(e);
            }
            Err(e) => {
                warn!(player_id = id, error = %e, "Transfers unavailable, filling with zeros");
                table.failures.push(FetchFailure {
                    player_id: id,
                    reason: e.to_string(),
                });
                TransferTotals::default()
            }
        };

        table.rows.push(TransferSummary::new(id, &player.web_name, totals));
    }

    info!(
        rows = table.rows.len(),
        failed = table.failures.len(),
        "Recent transfers complete"
    );

    Ok(table)
}
