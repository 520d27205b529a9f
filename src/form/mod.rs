//! Recent-form enrichment
//!
//! Averages each player's last N matches into five columns and joins them onto the roster.
//! A player whose history cannot be fetched gets zeros; the batch always completes.

#[cfg(test)]
mod tests;

use futures_util::StreamExt;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::client::{history_stream, HistorySource};
use crate::config::FormSettings;
use crate::error::{FormError, Result};
use crate::history::{is_chronological, recent_window, RecentForm, FORM_COLUMNS};
use crate::types::{FetchFailure, Player, PlayerId, Roster};

/// Roster row with the five recent-form columns attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedPlayer {
    #[serde(flatten)]
    pub player: Player,
    #[serde(flatten)]
    pub form: RecentForm,
}

/// Enriched table, in roster order, plus the players that were zero-filled
#[derive(Debug, Clone, Default, Serialize)]
pub struct Enrichment {
    pub players: Vec<EnrichedPlayer>,
    pub failures: Vec<FetchFailure>,
}

impl Enrichment {
    pub fn get(&self, id: PlayerId) -> Option<&EnrichedPlayer> {
        self.players.iter().find(|p| p.player.id == id)
    }
}

/// Fetch every player's history and reduce it to recent form.
///
/// Failed players are left out of the map and reported in the failure list.
pub async fn collect_recent_form<S>(
    source: &S,
    ids: Vec<PlayerId>,
    settings: &FormSettings,
) -> Result<(HashMap<PlayerId, RecentForm>, Vec<FetchFailure>)>
where
    S: HistorySource + ?Sized,
{
    if settings.window == 0 {
        return Err(FormError::InvalidWindow(settings.window));
    }

    let mut forms = HashMap::with_capacity(ids.len());
    let mut failures = Vec::new();

    let mut results = std::pin::pin!(history_stream(source, ids, settings.concurrency));
    while let Some((id, result)) = results.next().await {
        match result {
            Ok(history) => {
                if !is_chronological(&history) {
                    debug!(player_id = id, "History rounds are out of order");
                }
                forms.insert(id, RecentForm::from_window(recent_window(&history, settings.window)));
            }
            Err(e) => {
                warn!(player_id = id, error = %e, "Recent form unavailable, filling with zeros");
                failures.push(FetchFailure {
                    player_id: id,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok((forms, failures))
}

/// Join computed form onto the roster. Players without an entry get zeros.
///
/// Existing columns with the same names as the form columns are replaced.
pub fn merge_recent_form(
    roster: &Roster,
    forms: &HashMap<PlayerId, RecentForm>,
) -> Vec<EnrichedPlayer> {
    roster
        .iter()
        .map(|player| {
            let mut player = player.clone();
            for column in FORM_COLUMNS {
                player.extra.remove(column);
            }
            let form = forms.get(&player.id).copied().unwrap_or_default();
            EnrichedPlayer { player, form }
        })
        .collect()
}

/// Attach recent-form averages over the last `settings.window` matches to every player
pub async fn enrich_with_recent_form<S>(
    source: &S,
    roster: &Roster,
    settings: &FormSettings,
) -> Result<Enrichment>
where
    S: HistorySource + ?Sized,
{
    info!(
        players = roster.len(),
        window = settings.window,
        "Computing recent form"
    );

    let (forms, failures) = collect_recent_form(source, roster.ids(), settings).await?;
    let players = merge_recent_form(roster, &forms);

    info!(
        players = players.len(),
        failed = failures.len(),
        "Recent form complete"
    );

    Ok(Enrichment { players, failures })
}
