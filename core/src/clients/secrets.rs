use async_trait::async_trait;
use aws_sdk_ssm::Client;
use tracing::{debug, error};

#[derive(Debug, thiserror::Error)]
#[error("parameter store get failed: {0}")]
pub struct SecretError(pub String);

/// Holds the price feed API key under a configured parameter path.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn get(&self, name: &str) -> Result<String, SecretError>;
}

/// SSM Parameter Store client.
pub struct SsmSecretStore {
    client: Client,
}

impl SsmSecretStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretStore for SsmSecretStore {
    async fn get(&self, name: &str) -> Result<String, SecretError> {
        debug!(parameter = %name, "Fetching API key from parameter store");

        let output = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "SSM get_parameter failed");
                SecretError(e.to_string())
            })?;

        output
            .parameter()
            .and_then(|p| p.value())
            .map(str::to_string)
            .ok_or_else(|| SecretError(format!("parameter {name} has no value")))
    }
}
