//! Outbound Mail Transport
//!
//! Sends mail through an HTTP mail relay: a JSON `POST` carrying
//! `{from, to, subject, html}` authenticated with a bearer credential.
//! The credentials and sender address are fixed at construction.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Request timeout for a single relay call
const MAIL_TIMEOUT: Duration = Duration::from_secs(10);

/// Mail transport configuration
#[derive(Clone)]
pub struct MailConfig {
    /// Relay endpoint, e.g. `https://mail.example.org/v1/send`
    pub endpoint: String,
    /// Bearer credential for the relay
    pub api_key: String,
    /// Sender address used for every message
    pub from: String,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .field("from", &self.from)
            .finish()
    }
}

/// A single outgoing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail transport setup failed: {0}")]
    Setup(String),

    #[error("Mail relay unreachable: {0}")]
    Transport(String),

    #[error("Mail relay rejected message with status {0}")]
    Rejected(u16),
}

#[derive(Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// HTTP mail relay client
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailConfig,
}

impl HttpMailer {
    pub fn new(config: MailConfig) -> Result<Self, MailError> {
        let client = reqwest::Client::builder()
            .timeout(MAIL_TIMEOUT)
            .build()
            .map_err(|e| MailError::Setup(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn sender(&self) -> &str {
        &self.config.from
    }

    /// Deliver one message; non-2xx relay responses are errors.
    pub async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let payload = RelayPayload {
            from: &self.config.from,
            to: &mail.to,
            subject: &mail.subject,
            html: &mail.html,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MailError::Rejected(status.as_u16()));
        }

        tracing::debug!(to = %mail.to, "Mail accepted by relay");
        Ok(())
    }
}
