use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt::Debug;

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn is_client_error(&self) -> bool {
        self.code >= 100
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error. Please try again later.",
            ),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "success": false,
            "code": self.code,
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "Invalid request body".into(),
    }
}

pub fn missing_fields_error(fields: &[&str]) -> Error {
    Error {
        code: 102,
        message: format!("All fields are required (missing: {})", fields.join(", ")),
    }
}

pub fn invalid_email_error() -> Error {
    Error {
        code: 103,
        message: "Please provide a valid email address".into(),
    }
}

pub fn invalid_phone_error() -> Error {
    Error {
        code: 104,
        message: "Phone number must be exactly 10 digits".into(),
    }
}

pub fn invalid_distance_error() -> Error {
    Error {
        code: 105,
        message: "Distance must be a non-negative number of kilometres".into(),
    }
}

pub fn distance_error(message: String) -> Error {
    Error { code: 106, message }
}

pub fn config_error<T: Debug>(err: T) -> Error {
    Error {
        code: 2,
        message: format!("configuration error: {:?}", err),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 5,
        message: "unexpected error".into(),
    }
}

#[test]
fn client_error_keeps_message() {
    let err = distance_error("Minimum 130 km required for one-way trips".into());
    assert!(err.is_client_error());

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn server_error_is_opaque() {
    let err = unexpected_error();
    assert!(!err.is_client_error());

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
