use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{Booking, BookingRequest, NotificationResult};
use crate::error::Error;

/// A processed request: the validated booking (with its fare estimate when a
/// distance was known) and the outcome of each notification channel.
#[derive(Clone, Debug)]
pub struct Receipt {
    pub booking: Booking,
    pub notifications: NotificationResult,
}

#[async_trait]
pub trait BookingAPI {
    /// Accepts a preliminary request. A distance, when given, must satisfy the
    /// minimum-distance rule; without one the rule is deferred to confirmation.
    async fn submit_enquiry(&self, request: BookingRequest) -> Result<Receipt, Error>;

    /// Accepts a priced booking. The distance is mandatory.
    async fn confirm_booking(&self, request: BookingRequest) -> Result<Receipt, Error>;
}

pub trait API: BookingAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
