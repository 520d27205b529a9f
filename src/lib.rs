//! FPL recent form
//!
//! Pulls per-player match history from the Fantasy Premier League API and reduces the
//! last few matches to recent-form averages and transfer totals.

pub mod analyzer;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod history;
pub mod logging;
pub mod transfers;
pub mod types;


pub use crate::analyzer::FormAnalyzer;
pub use crate::client::{FplClient, HistorySource, StaticHistorySource};
pub use crate::config::{Config, FailurePolicy};
pub use crate::error::{FormError, Result};
pub use crate::form::{enrich_with_recent_form, EnrichedPlayer, Enrichment};
pub use crate::history::{HistoryEntry, RecentForm};
pub use crate::transfers::{recent_transfers, TransferSummary, TransferTable};
pub use crate::types::{FetchFailure, Player, PlayerId, Roster};
