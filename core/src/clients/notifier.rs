use async_trait::async_trait;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use aws_sdk_sesv2::Client;
use tracing::{debug, error};

#[derive(Debug, thiserror::Error)]
#[error("email send failed: {0}")]
pub struct NotifyError(pub String);

/// Outbound email service.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// SES client bound to the configured sender address.
pub struct SesNotifier {
    client: Client,
    sender: String,
}

impl SesNotifier {
    pub fn new(client: Client, sender: impl Into<String>) -> Self {
        Self {
            client,
            sender: sender.into(),
        }
    }
}

#[async_trait]
impl Notifier for SesNotifier {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        let content = |data: &str| {
            Content::builder()
                .data(data)
                .charset("UTF-8")
                .build()
                .map_err(|e| NotifyError(e.to_string()))
        };

        let message = Message::builder()
            .subject(content(subject)?)
            .body(Body::builder().text(content(body)?).build())
            .build();

        debug!(%to, "Sending price email");

        self.client
            .send_email()
            .from_email_address(&self.sender)
            .destination(Destination::builder().to_addresses(to).build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "SES send_email failed");
                NotifyError(e.to_string())
            })?;

        Ok(())
    }
}
