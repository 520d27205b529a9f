//! Match history sources
//!
//! - `FplClient`: the public FPL `element-summary` endpoint over HTTP
//! - `StaticHistorySource`: canned histories for dry runs and tests

mod fpl;
pub mod mock;

pub use fpl::FplClient;
pub use mock::StaticHistorySource;

use crate::error::Result;
use crate::history::HistoryEntry;
use crate::types::PlayerId;
use async_trait::async_trait;
use futures_util::stream::{self, Stream, StreamExt};

/// Anything that can produce a player's match history, oldest match first
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistorySource: Send + Sync {
    async fn fetch_history(&self, player_id: PlayerId) -> Result<Vec<HistoryEntry>>;
}

/// Fetch histories for `ids`, yielding results in the same order as `ids`.
///
/// At most `concurrency` requests are in flight; 1 makes the fetches strictly serial.
/// Dropping the stream cancels whatever is still pending.
pub fn history_stream<'a, S>(
    source: &'a S,
    ids: Vec<PlayerId>,
    concurrency: usize,
) -> impl Stream<Item = (PlayerId, Result<Vec<HistoryEntry>>)> + 'a
where
    S: HistorySource + ?Sized,
{
    stream::iter(ids)
        .map(move |id| async move {
            tracing::debug!(player_id = id, "Fetching match history");
            (id, source.fetch_history(id).await)
        })
        .buffered(concurrency.max(1))
}
