use crate::error::Result;
use crate::utils::constants::{
    CONFIG_FILE, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, ENV_PREFIX,
};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use validator::Validate;

/// Settings for the upstream fetcher.
///
/// Layered as: built-in defaults, then `lpo-weather.toml` in the working
/// directory (or an explicit file), then `LPO_WEATHER_*` environment
/// variables.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct Settings {
    #[validate(url)]
    pub base_url: String,

    #[validate(length(min = 1))]
    pub user_agent: String,

    #[validate(range(min = 1, max = 600))]
    pub timeout_secs: u64,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(CONFIG_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
