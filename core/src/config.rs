use std::env;

use crate::clients::price_feed::DEFAULT_BASE_URL;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Immutable configuration, read from the environment once at cold start.
#[derive(Debug, Clone)]
pub struct Config {
    /// Parameter-store path holding the price feed API key.
    pub token_parameter: String,
    /// Verified sender address for outgoing emails.
    pub sender_email: String,
    /// Record-store table name.
    pub table_name: String,
    /// Price feed base URL.
    pub price_api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            token_parameter: require("TOKEN_PARAMETER")?,
            sender_email: require("SENDER_EMAIL")?,
            table_name: require("TABLE_NAME")?,
            price_api_url: env::var("PRICE_API_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}
