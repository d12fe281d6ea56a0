//! Transactional email transports.
//!
//! `HttpEmailSender` posts to a Resend-compatible HTTP API. Without an API key
//! the service falls back to `LogEmailSender`, which only writes to tracing.
//! `FakeEmailSender` records messages for tests.

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Serialize;

use crate::config::EmailConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, msg: EmailMessage) -> Result<()>;
}

pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, msg: EmailMessage) -> Result<()> {
        tracing::info!(
            to = %msg.to,
            subject = %msg.subject,
            "email transport not configured, logging message\n{}",
            msg.text,
        );
        Ok(())
    }
}

pub struct HttpEmailSender {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

impl HttpEmailSender {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        from: impl Into<String>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
            from: from.into(),
        })
    }
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    #[tracing::instrument(name = "HttpEmailSender::send", skip_all, fields(to = %msg.to))]
    async fn send(&self, msg: EmailMessage) -> Result<()> {
        let res = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&SendRequest {
                from: &self.from,
                to: &msg.to,
                subject: &msg.subject,
                html: &msg.html,
                text: &msg.text,
            })
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(anyhow!("email API error {}: {}", status, body));
        }

        tracing::info!(subject = %msg.subject, "email sent");
        Ok(())
    }
}

/// Picks the live transport when an API key is configured.
pub fn from_config(config: &EmailConfig) -> Result<Box<dyn EmailSender>> {
    match &config.api_key {
        Some(api_key) => Ok(Box::new(HttpEmailSender::new(
            config.api_url.as_str(),
            api_key.as_str(),
            config.from.as_str(),
        )?)),
        None => {
            tracing::warn!("EMAIL_API_KEY not set, emails will only be logged");
            Ok(Box::new(LogEmailSender))
        }
    }
}

#[cfg(test)]
pub mod fakes {
    use std::sync::Mutex;

    use anyhow::{anyhow, Result};
    use async_trait::async_trait;

    use super::*;

    /// Collects sent messages in memory. `failing()` rejects every send.
    #[derive(Default)]
    pub struct FakeEmailSender {
        pub sent: Mutex<Vec<EmailMessage>>,
        fail: bool,
    }

    impl FakeEmailSender {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing() -> Self {
            Self {
                sent: Mutex::default(),
                fail: true,
            }
        }

        pub fn sent_messages(&self) -> Vec<EmailMessage> {
            self.sent
                .lock()
                .map(|sent| sent.clone())
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl EmailSender for FakeEmailSender {
        async fn send(&self, msg: EmailMessage) -> Result<()> {
            if self.fail {
                return Err(anyhow!("smtp connection refused"));
            }

            self.sent
                .lock()
                .map_err(|_| anyhow!("fake sender poisoned"))?
                .push(msg);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fakes::*;
    use super::*;

    fn message() -> EmailMessage {
        EmailMessage {
            to: "rider@example.com".into(),
            subject: "Booking Confirmation".into(),
            html: "<p>Thanks</p>".into(),
            text: "Thanks".into(),
        }
    }

    #[tokio::test]
    async fn fake_sender_captures_messages() {
        let sender = FakeEmailSender::new();
        sender.send(message()).await.unwrap();

        let sent = sender.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "rider@example.com");
    }

    #[tokio::test]
    async fn failing_sender_errors_and_records_nothing() {
        let sender = FakeEmailSender::failing();

        assert!(sender.send(message()).await.is_err());
        assert!(sender.sent_messages().is_empty());
    }

    #[tokio::test]
    async fn log_sender_does_not_error() {
        LogEmailSender.send(message()).await.unwrap();
    }

    #[test]
    fn missing_key_selects_log_sender() {
        let config = crate::config::Config::default();
        assert!(from_config(&config.email).is_ok());
    }
}
