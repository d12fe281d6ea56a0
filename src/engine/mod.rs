mod booking_api;
mod messages;
mod notifier;
mod validation;

use std::sync::Arc;

pub use notifier::Notifier;

use crate::{
    api::API,
    config::Config,
    error::{config_error, Error},
    external::{
        email::{self, EmailSender},
        telegram::{self, TelegramSender},
    },
};

pub struct Engine {
    notifier: Notifier,
}

impl Engine {
    /// Builds the live transports described by `config`.
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(config: &Config) -> Result<Self, Error> {
        let email: Arc<dyn EmailSender> = email::from_config(&config.email)
            .map_err(config_error)?
            .into();
        let telegram: Arc<dyn TelegramSender> = telegram::from_config(&config.telegram)
            .map_err(config_error)?
            .into();

        Ok(Self::with_transports(config, email, telegram))
    }

    pub fn with_transports(
        config: &Config,
        email: Arc<dyn EmailSender>,
        telegram: Arc<dyn TelegramSender>,
    ) -> Self {
        Self {
            notifier: Notifier::new(
                email,
                telegram,
                &config.email,
                &config.telegram,
                config.contact.clone(),
            ),
        }
    }
}

impl API for Engine {}
