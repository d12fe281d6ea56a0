use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::{config_error, Error};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_ADMIN_EMAIL: &str = "happyridedroptaxi@gmail.com";
const DEFAULT_WHATSAPP_NUMBER: &str = "919087520500";
const DEFAULT_SUPPORT_PHONE: &str = "+91 90875 20500";
const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const DEFAULT_EMAIL_API_URL: &str = "https://api.resend.com/emails";

/// Process-wide settings, read once at startup from the environment (and
/// `.env` when present).
#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub email: EmailConfig,
    pub telegram: TelegramConfig,
    pub contact: ContactConfig,
}

#[derive(Clone, Debug)]
pub struct EmailConfig {
    /// Missing key means emails are only logged.
    pub api_key: Option<String>,
    pub api_url: String,
    pub from: String,
    pub admin: String,
}

#[derive(Clone, Debug)]
pub struct TelegramConfig {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub username: Option<String>,
    pub api_base: String,
}

#[derive(Clone, Debug)]
pub struct ContactConfig {
    pub whatsapp_number: String,
    pub support_phone: String,
}

impl Config {
    #[tracing::instrument(name = "Config::from_env")]
    pub fn from_env() -> Result<Self, Error> {
        let host: IpAddr = match optional("BIND_ADDR") {
            Some(host) => host.parse().map_err(config_error)?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };
        let port: u16 = match optional("PORT") {
            Some(port) => port.parse().map_err(config_error)?,
            None => DEFAULT_PORT,
        };

        let admin = optional("ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.into());

        Ok(Self {
            addr: SocketAddr::new(host, port),
            email: EmailConfig {
                api_key: optional("EMAIL_API_KEY"),
                api_url: optional("EMAIL_API_URL").unwrap_or_else(|| DEFAULT_EMAIL_API_URL.into()),
                from: optional("EMAIL_FROM").unwrap_or_else(|| admin.clone()),
                admin,
            },
            telegram: TelegramConfig {
                bot_token: optional("TELEGRAM_BOT_TOKEN"),
                chat_id: optional("TELEGRAM_CHAT_ID"),
                username: optional("TELEGRAM_USERNAME"),
                api_base: optional("TELEGRAM_API_BASE")
                    .unwrap_or_else(|| DEFAULT_TELEGRAM_API_BASE.into()),
            },
            contact: ContactConfig {
                whatsapp_number: optional("WHATSAPP_NUMBER")
                    .unwrap_or_else(|| DEFAULT_WHATSAPP_NUMBER.into()),
                support_phone: optional("SUPPORT_PHONE")
                    .unwrap_or_else(|| DEFAULT_SUPPORT_PHONE.into()),
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_PORT),
            email: EmailConfig {
                api_key: None,
                api_url: DEFAULT_EMAIL_API_URL.into(),
                from: DEFAULT_ADMIN_EMAIL.into(),
                admin: DEFAULT_ADMIN_EMAIL.into(),
            },
            telegram: TelegramConfig {
                bot_token: None,
                chat_id: None,
                username: None,
                api_base: DEFAULT_TELEGRAM_API_BASE.into(),
            },
            contact: ContactConfig {
                whatsapp_number: DEFAULT_WHATSAPP_NUMBER.into(),
                support_phone: DEFAULT_SUPPORT_PHONE.into(),
            },
        }
    }
}

// empty values count as unset
fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[test]
fn default_config_disables_telegram() {
    let config = Config::default();

    assert!(config.telegram.bot_token.is_none());
    assert!(config.email.api_key.is_none());
    assert_eq!(config.addr.port(), 5000);
}
