use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

const VS_CURRENCY: &str = "usd";
const API_KEY_HEADER: &str = "x-cg-demo-api-key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
#[error("price feed request failed: {0}")]
pub struct FeedError(pub String);

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        Self(err.to_string())
    }
}

/// One asset's entry in the feed's `simple/price` response. Market cap,
/// volume and change are absent unless requested, so they default to zero.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SimplePrice {
    pub usd: f64,
    #[serde(default)]
    pub usd_market_cap: f64,
    #[serde(default)]
    pub usd_24h_vol: f64,
    #[serde(default)]
    pub usd_24h_change: f64,
}

/// Third-party price API. An unknown asset yields an empty map, not an error.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    async fn simple_price(
        &self,
        symbol: &str,
        api_key: &str,
    ) -> Result<HashMap<String, SimplePrice>, FeedError>;
}

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: reqwest::Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// For tests / custom endpoints.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceFeed for CoinGeckoClient {
    async fn simple_price(
        &self,
        symbol: &str,
        api_key: &str,
    ) -> Result<HashMap<String, SimplePrice>, FeedError> {
        let url = format!("{}/simple/price", self.base_url);
        debug!(%symbol, "Fetching current price");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("ids", symbol),
                ("vs_currencies", VS_CURRENCY),
                ("include_market_cap", "true"),
                ("include_24hr_vol", "true"),
                ("include_24hr_change", "true"),
                ("precision", "2"),
            ])
            .header(API_KEY_HEADER, api_key)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;

        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_price_payload() {
        let json = r#"{
            "bitcoin": {
                "usd": 67342.12,
                "usd_market_cap": 1324500000000.0,
                "usd_24h_vol": 28300000000.0,
                "usd_24h_change": -1.25
            }
        }"#;

        let prices: HashMap<String, SimplePrice> = serde_json::from_str(json).unwrap();
        let btc = &prices["bitcoin"];
        assert_eq!(btc.usd, 67342.12);
        assert_eq!(btc.usd_market_cap, 1324500000000.0);
        assert_eq!(btc.usd_24h_vol, 28300000000.0);
        assert_eq!(btc.usd_24h_change, -1.25);
    }

    #[test]
    fn missing_optional_fields_default_to_zero() {
        let prices: HashMap<String, SimplePrice> =
            serde_json::from_str(r#"{"bitcoin": {"usd": 1.0}}"#).unwrap();
        assert_eq!(prices["bitcoin"].usd_market_cap, 0.0);
        assert_eq!(prices["bitcoin"].usd_24h_vol, 0.0);
    }

    #[test]
    fn unknown_asset_is_an_empty_map() {
        let prices: HashMap<String, SimplePrice> = serde_json::from_str("{}").unwrap();
        assert!(prices.is_empty());
    }
}
