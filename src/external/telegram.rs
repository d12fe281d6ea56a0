//! Telegram Bot API `sendMessage` client.

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::TelegramConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait TelegramSender: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<()>;
}

/// Stand-in used when no bot token or chat id is configured.
pub struct DisabledTelegram;

#[async_trait]
impl TelegramSender for DisabledTelegram {
    async fn send_message(&self, _text: &str) -> Result<()> {
        Err(anyhow!("telegram bot is not configured"))
    }
}

pub struct BotApiTelegram {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct Response {
    ok: bool,
    description: Option<String>,
}

impl BotApiTelegram {
    pub fn new(
        api_base: impl Into<String>,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.into(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.bot_token
        )
    }
}

#[async_trait]
impl TelegramSender for BotApiTelegram {
    #[tracing::instrument(name = "BotApiTelegram::send_message", skip_all)]
    async fn send_message(&self, text: &str) -> Result<()> {
        let res = self
            .client
            .post(self.url())
            .json(&SendMessage {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await?;

        let status = res.status();
        let data: Response = res.json().await?;

        if !status.is_success() || !data.ok {
            return Err(anyhow!(
                "telegram API error {}: {}",
                status,
                data.description.unwrap_or_default()
            ));
        }

        tracing::info!(chat_id = %self.chat_id, "telegram message sent");
        Ok(())
    }
}

pub fn from_config(config: &TelegramConfig) -> Result<Box<dyn TelegramSender>> {
    match (&config.bot_token, &config.chat_id) {
        (Some(bot_token), Some(chat_id)) => Ok(Box::new(BotApiTelegram::new(
            config.api_base.as_str(),
            bot_token.as_str(),
            chat_id.as_str(),
        )?)),
        _ => {
            tracing::warn!("TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID not set, telegram disabled");
            Ok(Box::new(DisabledTelegram))
        }
    }
}
