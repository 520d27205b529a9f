//! FPL API client for player match history

use crate::config::ApiConfig;
use crate::error::{FormError, Result};
use crate::history::{ElementSummary, HistoryEntry};
use crate::types::PlayerId;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::HistorySource;

/// HTTP client for `element-summary/{id}/`
pub struct FplClient {
    http: Client,
    base_url: String,
}

impl FplClient {
    /// Create a new client. No timeout is set unless the config asks for one.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn history_url(&self, player_id: PlayerId) -> String {
        format!("{}/element-summary/{}/", self.base_url, player_id)
    }

    /// Get the element summary for one player
    pub async fn get_element_summary(&self, player_id: PlayerId) -> Result<ElementSummary> {
        let url = self.history_url(player_id);
        let resp = self.http.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FormError::Api {
                status: status.as_u16(),
                url,
            });
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl HistorySource for FplClient {
    async fn fetch_history(&self, player_id: PlayerId) -> Result<Vec<HistoryEntry>> {
        Ok(self.get_element_summary(player_id).await?.history)
    }
}
