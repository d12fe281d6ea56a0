use std::sync::Arc;

use crate::config::{ContactConfig, EmailConfig, TelegramConfig};
use crate::engine::messages::{
    chat_message, telegram_link, whatsapp_link, AdminEmail, CustomerEmail,
};
use crate::entities::{Booking, EmailResults, NotificationResult};
use crate::external::email::{EmailMessage, EmailSender};
use crate::external::telegram::TelegramSender;

/// Fans a booking out to every channel. Channels are attempted one after
/// another and independently: a failure is logged and recorded, never
/// returned.
pub struct Notifier {
    email: Arc<dyn EmailSender>,
    telegram: Arc<dyn TelegramSender>,
    admin_email: String,
    telegram_username: Option<String>,
    contact: ContactConfig,
}

impl Notifier {
    pub fn new(
        email: Arc<dyn EmailSender>,
        telegram: Arc<dyn TelegramSender>,
        email_config: &EmailConfig,
        telegram_config: &TelegramConfig,
        contact: ContactConfig,
    ) -> Self {
        Self {
            email,
            telegram,
            admin_email: email_config.admin.clone(),
            telegram_username: telegram_config.username.clone(),
            contact,
        }
    }

    #[tracing::instrument(
        name = "Notifier::dispatch",
        skip_all,
        fields(booking_id = %booking.booking_id)
    )]
    pub async fn dispatch(&self, booking: &Booking) -> NotificationResult {
        let admin = self
            .send_email(
                "admin",
                AdminEmail {
                    to: &self.admin_email,
                    booking,
                }
                .render(),
            )
            .await;

        let customer = if booking.email.is_empty() {
            tracing::info!("no customer email given, skipping confirmation email");
            false
        } else {
            self.send_email(
                "customer",
                CustomerEmail {
                    booking,
                    contact: &self.contact,
                }
                .render(),
            )
            .await
        };

        let message = chat_message(booking);

        let telegram = match self.telegram.send_message(&message).await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(error = %err, "telegram notification failed");
                false
            }
        };

        NotificationResult {
            email: EmailResults { admin, customer },
            telegram,
            whatsapp_link: whatsapp_link(&self.contact.whatsapp_number, &message),
            telegram_link: telegram_link(self.telegram_username.as_deref(), &message),
            booking_id: booking.booking_id.clone(),
        }
    }

    async fn send_email(&self, recipient: &'static str, msg: EmailMessage) -> bool {
        match self.email.send(msg).await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(recipient, error = %err, "email notification failed");
                false
            }
        }
    }
}
