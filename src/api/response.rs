//! Response helpers shared by all handlers

use std::error::Error;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned when a record is created
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedId {
    pub id: i32,
}

/// JSON status message
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Serialize `payload` and write it with `status`.
///
/// The body is fully encoded before the response is built, so an encoding
/// failure turns into a plain 500 instead of a truncated JSON document.
pub fn respond_with_json<T: Serialize>(status: StatusCode, payload: &T) -> Response {
    match serde_json::to_vec(payload) {
        Ok(body) => (
            status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )],
            body,
        )
            .into_response(),
        Err(err) => {
            tracing::error!("Error encoding response: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error encoding response").into_response()
        }
    }
}

/// Log `err` and reply with `message` as a plain-text body
pub fn handle_error(message: &str, err: &dyn Error, status: StatusCode) -> Response {
    if status.is_server_error() {
        tracing::error!("{}: {}", message, err);
    } else {
        tracing::warn!("{}: {}", message, err);
    }
    (status, message.to_string()).into_response()
}

/// JSON payload with an explicit status, encoded through [`respond_with_json`]
pub struct JsonReply<T>(pub StatusCode, pub T);

impl<T> JsonReply<T> {
    pub fn ok(payload: T) -> Self {
        Self(StatusCode::OK, payload)
    }

    pub fn created(payload: T) -> Self {
        Self(StatusCode::CREATED, payload)
    }
}

impl<T: Serialize> IntoResponse for JsonReply<T> {
    fn into_response(self) -> Response {
        respond_with_json(self.0, &self.1)
    }
}
