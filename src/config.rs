//! Configuration management

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

use crate::error::{FormError, Result};

/// Public FPL API root
pub const DEFAULT_BASE_URL: &str = "https://fantasy.premierleague.com/api";

/// Matches considered per player unless configured otherwise
pub const DEFAULT_WINDOW: usize = 4;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub form: FormSettings,
    pub transfers: TransferSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root, without the trailing `/element-summary` path
    pub base_url: String,
    /// Per-request timeout in seconds. Unset means no timeout.
    pub timeout_secs: Option<u64>,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormSettings {
    /// Number of most recent matches averaged per player
    pub window: usize,
    /// Requests in flight at once (1 = strictly serial)
    pub concurrency: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransferSettings {
    /// Number of most recent matches summed per player
    pub window: usize,
    /// Requests in flight at once (1 = strictly serial)
    pub concurrency: usize,
    /// What a failed fetch does to the run
    pub on_error: FailurePolicy,
}

/// How a batch reacts to a single player's fetch failure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Zero-fill the player, record the failure, keep going
    #[default]
    Isolate,
    /// Stop at the first failure and return it
    Abort,
}

impl Config {
    /// Load configuration from file, with `FPL_FORM__SECTION__KEY` environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix("FPL_FORM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let config: Config = settings
            .try_deserialize()
            .context("failed to deserialize config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from default locations, falling back to built-in defaults
    pub fn load_default() -> anyhow::Result<Self> {
        let paths = ["fpl_form.toml", "config.toml", "~/.config/fpl-form/config.toml"];

        for path in paths {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                return Self::load(expanded.as_ref());
            }
        }

        tracing::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Reject settings the operations cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.form.window == 0 {
            return Err(FormError::InvalidWindow(self.form.window));
        }
        if self.transfers.window == 0 {
            return Err(FormError::InvalidWindow(self.transfers.window));
        }
        if self.form.concurrency == 0 || self.transfers.concurrency == 0 {
            return Err(FormError::Config(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(FormError::Config("api.base_url is empty".to_string()));
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            user_agent: concat!("fpl-form/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            concurrency: 1,
        }
    }
}

impl Default for TransferSettings {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            concurrency: 1,
            on_error: FailurePolicy::Isolate,
        }
    }
}
