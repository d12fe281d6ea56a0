use super::validation::validate;
use super::Engine;

use async_trait::async_trait;

use crate::{
    api::{BookingAPI, Receipt},
    entities::{evaluate, Booking, BookingKind, BookingRequest, Trip, Verdict},
    error::{distance_error, Error},
};

impl Engine {
    /// Prices the booking when a distance is known. A rejection is terminal.
    fn apply_fare_rule(
        &self,
        mut booking: Booking,
        distance: Option<f64>,
        duration: Option<String>,
    ) -> Result<Booking, Error> {
        let Some(distance) = distance else {
            tracing::info!("no distance given, deferring minimum-distance check");
            return Ok(booking);
        };

        let verdict = evaluate(
            Trip {
                trip_type: booking.trip_type,
                car_type: booking.car_type,
                distance,
                pickup_location: &booking.pickup_location,
                drop_location: &booking.drop_location,
            },
            duration,
        );

        match verdict {
            Verdict::Accepted(estimate) => {
                booking.estimation = Some(estimate);
                Ok(booking)
            }
            Verdict::Rejected {
                min_distance,
                message,
            } => {
                tracing::info!(distance, min_distance, "trip below minimum distance");
                Err(distance_error(message))
            }
        }
    }

    async fn process(&self, request: BookingRequest, kind: BookingKind) -> Result<Receipt, Error> {
        let distance = request.committed_distance();
        let duration = request.client_duration();

        let booking = validate(request, kind)?;
        let booking = self.apply_fare_rule(booking, distance, duration)?;

        let notifications = self.notifier.dispatch(&booking).await;

        tracing::info!(
            booking_id = %booking.booking_id,
            admin_email = notifications.email.admin,
            customer_email = notifications.email.customer,
            telegram = notifications.telegram,
            "request processed"
        );

        Ok(Receipt {
            booking,
            notifications,
        })
    }
}

#[async_trait]
impl BookingAPI for Engine {
    #[tracing::instrument(skip_all)]
    async fn submit_enquiry(&self, request: BookingRequest) -> Result<Receipt, Error> {
        self.process(request, BookingKind::Enquiry).await
    }

    #[tracing::instrument(skip_all)]
    async fn confirm_booking(&self, request: BookingRequest) -> Result<Receipt, Error> {
        self.process(request, BookingKind::Confirmation).await
    }
}
