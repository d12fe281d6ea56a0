//! Message rendering for the notification channels.
//!
//! `AdminEmail` and `CustomerEmail` render an `EmailMessage` ready for an
//! `EmailSender`; `chat_message` is the plain text shared by the WhatsApp and
//! Telegram links and the bot message.

use crate::config::ContactConfig;
use crate::entities::{Booking, BookingKind};
use crate::external::email::EmailMessage;

const BRAND: &str = "Happy Ride Drop Taxi";

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn rupees(amount: f64) -> String {
    format!("₹{}", amount)
}

/// Label/value pairs shown in every channel, in display order.
fn detail_rows(booking: &Booking) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Booking ID", booking.booking_id.clone()),
        ("Customer Name", booking.name.clone()),
        ("Phone", booking.phone.clone()),
    ];

    if !booking.email.is_empty() {
        rows.push(("Email", booking.email.clone()));
    }

    rows.extend([
        ("Pickup Location", booking.pickup_location.clone()),
        ("Drop Location", booking.drop_location.clone()),
        ("Trip Type", booking.trip_type.to_string()),
        ("Car Type", booking.car_type.to_string()),
        ("Date", booking.date.clone()),
        ("Time", booking.time.clone()),
    ]);

    if let Some(estimation) = &booking.estimation {
        rows.extend([
            ("Distance", format!("{} km", estimation.distance)),
            ("Duration", estimation.duration.clone()),
            ("Base Fare", rupees(estimation.base_fare)),
            ("Estimated Fare", rupees(estimation.total_fare)),
        ]);
    }

    rows
}

fn heading(kind: BookingKind) -> &'static str {
    match kind {
        BookingKind::Enquiry => "New Taxi Enquiry",
        BookingKind::Confirmation => "New Taxi Booking",
    }
}

pub fn chat_message(booking: &Booking) -> String {
    let mut lines = vec![format!("{}:", heading(booking.kind))];
    lines.extend(
        detail_rows(booking)
            .into_iter()
            .map(|(label, value)| format!("{}: {}", label, value)),
    );
    lines.join("\n")
}

pub fn whatsapp_link(number: &str, message: &str) -> String {
    format!("https://wa.me/{}?text={}", number, urlencoding::encode(message))
}

/// Deep link into a chat with the operator account, or the share dialog when
/// no username is configured.
pub fn telegram_link(username: Option<&str>, message: &str) -> String {
    let text = urlencoding::encode(message);
    match username {
        Some(username) => format!(
            "https://t.me/{}?text={}",
            username.trim_start_matches('@'),
            text
        ),
        None => format!("https://t.me/share/url?url=&text={}", text),
    }
}

pub struct AdminEmail<'a> {
    pub to: &'a str,
    pub booking: &'a Booking,
}

impl<'a> AdminEmail<'a> {
    pub fn render(&self) -> EmailMessage {
        let subject = match self.booking.kind {
            BookingKind::Enquiry => format!("New Taxi Enquiry - {}", BRAND),
            BookingKind::Confirmation => format!("New Taxi Booking Request - {}", BRAND),
        };

        let rows = detail_rows(self.booking);
        let table: String = rows
            .iter()
            .map(|(label, value)| {
                format!(
                    r#"<tr><td style="padding: 8px; border-bottom: 1px solid #e5e7eb;"><strong>{}:</strong></td><td style="padding: 8px; border-bottom: 1px solid #e5e7eb;">{}</td></tr>"#,
                    label,
                    escape_html(value)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let html = format!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
<div style="background: #FBBF24; padding: 20px; text-align: center;">
<h1 style="color: #1F2937; margin: 0;">🚕 {heading}</h1>
</div>
<div style="padding: 20px; border: 1px solid #e5e7eb;">
<h2 style="color: #1F2937;">Booking Details</h2>
<table style="width: 100%; border-collapse: collapse;">
{table}
</table>
</div>
</div>"#,
            heading = heading(self.booking.kind),
            table = table,
        );

        EmailMessage {
            to: self.to.to_string(),
            subject,
            html,
            text: chat_message(self.booking),
        }
    }
}

pub struct CustomerEmail<'a> {
    pub booking: &'a Booking,
    pub contact: &'a ContactConfig,
}

impl<'a> CustomerEmail<'a> {
    pub fn render(&self) -> EmailMessage {
        let booking = self.booking;
        let subject = match booking.kind {
            BookingKind::Enquiry => format!("Enquiry Received - {}", BRAND),
            BookingKind::Confirmation => format!("Booking Confirmation - {}", BRAND),
        };

        let details: String = detail_rows(booking)
            .iter()
            .map(|(label, value)| {
                format!("<p><strong>{}:</strong> {}</p>", label, escape_html(value))
            })
            .collect::<Vec<_>>()
            .join("\n");

        let tel: String = self
            .contact
            .support_phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();

        let html = format!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
<div style="background: #FBBF24; padding: 20px; text-align: center;">
<h1 style="color: #1F2937; margin: 0;">🚕 {brand}</h1>
<p style="color: #1F2937; margin: 10px 0 0 0;">{subject}</p>
</div>
<div style="padding: 20px; border: 1px solid #e5e7eb;">
<p>Dear <strong>{name}</strong>,</p>
<p>Thank you for choosing {brand}! We have received your request and will contact you shortly to confirm the details.</p>
<h3 style="color: #1F2937;">Your Trip Details:</h3>
<div style="background: #f9fafb; padding: 15px; border-radius: 8px; margin: 15px 0;">
{details}
</div>
<p>Our team will call you at <strong>{phone}</strong> within 30 minutes to confirm your booking and provide the final quote.</p>
<div style="text-align: center; margin: 20px 0;">
<a href="tel:{tel}" style="background: #FBBF24; color: #1F2937; padding: 12px 24px; text-decoration: none; border-radius: 6px; font-weight: bold;">📞 Call Us: {support_phone}</a>
</div>
<p style="color: #6b7280; font-size: 14px; margin-top: 20px;">Best regards,<br>{brand} Team</p>
</div>
</div>"#,
            brand = BRAND,
            subject = subject,
            name = escape_html(&booking.name),
            details = details,
            phone = escape_html(&booking.phone),
            tel = tel,
            support_phone = self.contact.support_phone,
        );

        let text = format!(
            "Dear {},\n\nThank you for choosing {}! We have received your request.\n\n{}\n\nOur team will call you at {} within 30 minutes. Call us: {}\n",
            booking.name,
            BRAND,
            chat_message(booking),
            booking.phone,
            self.contact.support_phone,
        );

        EmailMessage {
            to: booking.email.clone(),
            subject,
            html,
            text,
        }
    }
}
