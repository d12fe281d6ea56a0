use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Json};
use serde::Serialize;

use crate::api::{DynAPI, Receipt};
use crate::entities::{BookingKind, BookingRequest, FareEstimate, NotificationResult};
use crate::error::{invalid_input_error, Error};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    success: bool,
    message: String,
    whatsapp_link: String,
    telegram_link: String,
    booking_id: String,
    notification_results: NotificationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    estimation: Option<FareEstimate>,
}

impl From<Receipt> for BookingResponse {
    fn from(receipt: Receipt) -> Self {
        let message = match receipt.booking.kind {
            BookingKind::Enquiry => "Enquiry submitted successfully! We will contact you shortly.",
            BookingKind::Confirmation => "Booking request submitted successfully!",
        };

        Self {
            success: true,
            message: message.into(),
            whatsapp_link: receipt.notifications.whatsapp_link.clone(),
            telegram_link: receipt.notifications.telegram_link.clone(),
            booking_id: receipt.notifications.booking_id.clone(),
            notification_results: receipt.notifications,
            estimation: receipt.booking.estimation,
        }
    }
}

fn malformed_body(rejection: JsonRejection) -> Error {
    tracing::info!(%rejection, "rejecting malformed request body");

    invalid_input_error()
}

pub async fn enquiry(
    Extension(api): Extension<DynAPI>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<BookingResponse>, Error> {
    let Json(request) = payload.map_err(malformed_body)?;
    let receipt = api.submit_enquiry(request).await?;

    Ok(BookingResponse::from(receipt).into())
}

pub async fn book(
    Extension(api): Extension<DynAPI>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<BookingResponse>, Error> {
    let Json(request) = payload.map_err(malformed_body)?;
    let receipt = api.confirm_booking(request).await?;

    Ok(BookingResponse::from(receipt).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use crate::config::Config;
    use crate::engine::Engine;
    use crate::entities::{CarType, TripType};
    use crate::external::email::fakes::FakeEmailSender;
    use crate::external::telegram::fakes::FakeTelegramSender;

    fn api(email: FakeEmailSender) -> DynAPI {
        Arc::new(Engine::with_transports(
            &Config::default(),
            Arc::new(email),
            Arc::new(FakeTelegramSender::new()),
        ))
    }

    fn request(distance: f64) -> BookingRequest {
        BookingRequest {
            pickup_location: "Coimbatore".into(),
            drop_location: "Madurai".into(),
            trip_type: Some(TripType::OneWay),
            date: "2024-02-01".into(),
            time: "06:30".into(),
            car_type: Some(CarType::Suv),
            name: "Meena".into(),
            phone: "9876543210".into(),
            email: "meena@example.com".into(),
            distance: Some(distance),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn book_returns_links_and_results() {
        let Json(response) = book(
            Extension(api(FakeEmailSender::new())),
            Ok(Json(request(200.0))),
        )
        .await
        .unwrap();

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["estimation"]["totalFare"], 4200.0);
        assert_eq!(body["notificationResults"]["email"]["admin"], true);
        assert_eq!(body["notificationResults"]["telegram"], true);
        assert_eq!(body["bookingId"], body["notificationResults"]["bookingId"]);
        assert!(body["whatsappLink"]
            .as_str()
            .unwrap()
            .starts_with("https://wa.me/"));
    }

    #[tokio::test]
    async fn partial_notification_failure_is_still_ok() {
        let Json(response) = book(
            Extension(api(FakeEmailSender::failing())),
            Ok(Json(request(200.0))),
        )
        .await
        .unwrap();

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["notificationResults"]["email"]["admin"], false);
        assert_eq!(body["notificationResults"]["email"]["customer"], false);
        assert_eq!(body["notificationResults"]["telegram"], true);
    }

    #[tokio::test]
    async fn short_trip_is_bad_request() {
        let err = book(
            Extension(api(FakeEmailSender::new())),
            Ok(Json(request(129.0))),
        )
        .await
        .unwrap_err();

        assert_eq!(err.message, "Minimum 130 km required for one-way trips");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn enquiry_accepts_missing_distance() {
        let mut req = request(0.0);
        req.distance = None;

        let Json(response) = enquiry(Extension(api(FakeEmailSender::new())), Ok(Json(req)))
            .await
            .unwrap();

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["success"], true);
        assert!(body.get("estimation").is_none());
    }
}
