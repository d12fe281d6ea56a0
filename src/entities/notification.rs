use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailResults {
    pub admin: bool,
    pub customer: bool,
}

/// Per-channel delivery outcome of one booking. Informational only: a failed
/// channel never fails the request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResult {
    pub email: EmailResults,
    pub telegram: bool,
    pub whatsapp_link: String,
    pub telegram_link: String,
    pub booking_id: String,
}
