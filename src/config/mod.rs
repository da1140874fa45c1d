mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(&config_path).await?;
    let mut config = parse(&config_str)?;

    if let Ok(api_key) = env::var("LLM_API_KEY") {
        debug!("Using LLM API key from LLM_API_KEY");
        config.llm.api_key = api_key;
    }

    config.validate()?;

    Ok(config)
}

/// Parses a YAML document into a [`Config`] without applying environment overrides.
pub fn parse(yaml: &str) -> Result<Config> {
    Ok(serde_yaml::from_str(yaml)?)
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.llm.model.trim().is_empty() {
            return Err(Error::config("llm.model must not be empty"));
        }
        if self.server.port == 0 {
            return Err(Error::config("server.port must be non-zero"));
        }
        Ok(())
    }
}
