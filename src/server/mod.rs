mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::api::{DynAPI, API};
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{bookings, health};

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/api/enquiry", post(bookings::enquiry))
        .route("/api/book", post(bookings::book))
        .route("/api/health", get(health::check))
        .layer(Extension(api))
        .layer(CorsLayer::permissive())
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;

    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::try_bind(&addr)
        .map_err(|err| {
            tracing::error!(error = %err, "failed to bind {}", addr);
            unexpected_error()
        })?
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "server error");
            unexpected_error()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::api::{BookingAPI, Receipt};
    use crate::config::Config;
    use crate::engine::Engine;
    use crate::entities::BookingRequest;
    use crate::external::email::fakes::FakeEmailSender;
    use crate::external::telegram::fakes::FakeTelegramSender;

    struct BrokenAPI;

    #[async_trait]
    impl BookingAPI for BrokenAPI {
        async fn submit_enquiry(&self, _request: BookingRequest) -> Result<Receipt, Error> {
            Err(unexpected_error())
        }

        async fn confirm_booking(&self, _request: BookingRequest) -> Result<Receipt, Error> {
            Err(unexpected_error())
        }
    }

    impl API for BrokenAPI {}

    fn app() -> Router {
        router(Arc::new(Engine::with_transports(
            &Config::default(),
            Arc::new(FakeEmailSender::new()),
            Arc::new(FakeTelegramSender::new()),
        )))
    }

    fn trip() -> Value {
        json!({
            "pickupLocation": "Chennai",
            "dropLocation": "Trichy",
            "tripType": "one-way",
            "date": "2024-02-01",
            "time": "06:30",
            "carType": "sedan",
            "name": "Lakshmi",
            "phone": "9876543210",
            "email": "lakshmi@example.com",
            "distance": 320
        })
    }

    fn post_json(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn book_route_prices_trip() {
        let response = app().oneshot(post_json("/api/book", trip().to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["estimation"]["totalFare"], 320.0 * 14.0 + 400.0);
        assert!(body["bookingId"].as_str().unwrap().starts_with("HRD-"));
    }

    #[tokio::test]
    async fn enquiry_route_is_registered() {
        let mut trip = trip();
        trip.as_object_mut().unwrap().remove("distance");

        let response = app().oneshot(post_json("/api/enquiry", trip.to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(
            body["message"],
            "Enquiry submitted successfully! We will contact you shortly."
        );
    }

    #[tokio::test]
    async fn health_route() {
        let response = app()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "OK");
        assert_eq!(body["message"], "Server is running");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = app()
            .oneshot(Request::get("/api/bookings").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let response = app().oneshot(post_json("/api/book", "{not json".into())).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], 101);
        assert_eq!(body["message"], "Invalid request body");
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let mut trip = trip();
        trip.as_object_mut().unwrap().remove("time");

        let response = app().oneshot(post_json("/api/book", trip.to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], 102);
        assert_eq!(body["message"], "All fields are required (missing: time)");
    }

    #[tokio::test]
    async fn blank_selects_are_missing_fields() {
        let mut trip = trip();
        trip["carType"] = json!("");
        trip["tripType"] = json!("");

        let response = app().oneshot(post_json("/api/enquiry", trip.to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["code"], 102);
        assert_eq!(
            body["message"],
            "All fields are required (missing: tripType, carType)"
        );
    }

    #[tokio::test]
    async fn server_error_body_is_generic() {
        let app = router(Arc::new(BrokenAPI));

        let response = app.oneshot(post_json("/api/book", trip().to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_body(response).await;
        assert_eq!(
            body,
            json!({
                "success": false,
                "code": 5,
                "message": "Server error. Please try again later."
            })
        );
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let request = Request::get("/api/health")
            .header(header::ORIGIN, "https://happyridedroptaxi.com")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn cors_preflight() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/book")
            .header(header::ORIGIN, "https://happyridedroptaxi.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }
}
