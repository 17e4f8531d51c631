use std::env;

use anyhow::{Context, Result};
use tracing::info;

use studywise_openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Model credentials and endpoints, environment-driven. Configuration, not
/// core logic: nothing here changes what gets generated or stored.
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            api_key: env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?,
            base_url: var_or("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            model: var_or("STUDYWISE_MODEL", DEFAULT_MODEL),
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}
