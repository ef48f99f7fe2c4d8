/*
 * Responsibility
 * - The closed set of request failures (AppError) and their HTTP status codes
 * - IntoResponse: the only place that renders an error response (`{ "message": ... }`)
 * - Funnel layer errors / panics / anyhow errors into the same taxonomy
 */
use std::any::Any;

use axum::{
    BoxError, Json,
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub const AUTHENTICATION_REQUIRED: &str = "Authentication required";
pub const RESOURCE_NOT_FOUND: &str = "The requested resource does not exist";
pub const INTERNAL_ERROR_MESSAGE: &str = "An error occurred on the server";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("request timed out")]
    Timeout,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Every authorization failure carries the same message.
    pub fn unauthorized() -> Self {
        Self::Unauthorized(AUTHENTICATION_REQUIRED.to_string())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound(RESOURCE_NOT_FOUND.to_string())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text sent to the client. Server errors never expose their detail.
    pub fn public_message(&self) -> String {
        if self.status().is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            message: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        tracing::error!(error = ?e, "unhandled error");
        AppError::Internal
    }
}

/// Maps errors raised by tower layers (timeout, ...) onto the taxonomy.
pub async fn handle_layer_error(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        AppError::Timeout
    } else {
        tracing::error!(error = %err, "unhandled middleware error");
        AppError::Internal
    }
}

/// Panic handler for `CatchPanicLayer`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "handler panicked");

    AppError::Internal.into_response()
}
