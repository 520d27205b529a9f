//! Configured entry point bundling a history source with its settings

use crate::client::{FplClient, HistorySource};
use crate::config::Config;
use crate::error::Result;
use crate::form::{enrich_with_recent_form, Enrichment};
use crate::transfers::{recent_transfers, TransferTable};
use crate::types::Roster;

pub struct FormAnalyzer<S> {
    source: S,
    config: Config,
}

impl FormAnalyzer<FplClient> {
    /// Build an analyzer that talks to the FPL API described by `config.api`
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        let source = FplClient::new(&config.api)?;
        Ok(Self { source, config })
    }
}

impl<S: HistorySource> FormAnalyzer<S> {
    pub fn new(source: S, config: Config) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Recent-form columns for every roster player
    pub async fn enrich(&self, roster: &Roster) -> Result<Enrichment> {
        enrich_with_recent_form(&self.source, roster, &self.config.form).await
    }

    /// Recent transfer totals for every roster player
    pub async fn recent_transfers(&self, roster: &Roster) -> Result<TransferTable> {
        recent_transfers(&self.source, roster, &self.config.transfers).await
    }
}
