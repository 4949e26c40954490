use std::sync::Arc;

use aws_config::BehaviorVersion;

use crate::clients::notifier::{Notifier, SesNotifier};
use crate::clients::price_feed::{CoinGeckoClient, PriceFeed};
use crate::clients::records::{DynamoRecordStore, RecordStore};
use crate::clients::secrets::{SecretStore, SsmSecretStore};
use crate::config::{Config, ConfigError};

/// Process-wide collaborator set, built once at cold start and shared by
/// every invocation. Nothing here is rebuilt per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub secrets: Arc<dyn SecretStore>,
    pub feed: Arc<dyn PriceFeed>,
    pub records: Arc<dyn RecordStore>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Load configuration and construct the production collaborators against
    /// one shared AWS config.
    pub async fn from_env() -> Result<Self, ConfigError> {
        let config = Config::from_env()?;
        let aws = aws_config::load_defaults(BehaviorVersion::latest()).await;

        Ok(Self {
            secrets: Arc::new(SsmSecretStore::new(aws_sdk_ssm::Client::new(&aws))),
            feed: Arc::new(CoinGeckoClient::with_base_url(config.price_api_url.clone())),
            records: Arc::new(DynamoRecordStore::new(
                aws_sdk_dynamodb::Client::new(&aws),
                config.table_name.clone(),
            )),
            notifier: Arc::new(SesNotifier::new(
                aws_sdk_sesv2::Client::new(&aws),
                config.sender_email.clone(),
            )),
            config,
        })
    }
}
