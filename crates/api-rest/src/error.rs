use api_shared::ErrorRes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::any::Any;
use std::fmt::Display;

/// Errors a handler can return.
///
/// Provider and store failures never reach this type; the triage service recovers from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A field failed validation; reported as `Invalid input: <reason>`.
    InvalidInput(String),
    /// A request was well-formed but not acceptable, reported verbatim.
    BadRequest(String),
    /// Anything unexpected. Details are logged, never returned.
    Internal,
}

impl ApiError {
    pub fn invalid_input(reason: impl Display) -> Self {
        Self::InvalidInput(reason.to_string())
    }

    pub fn bad_request(reason: impl Display) -> Self {
        Self::BadRequest(reason.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            Self::InvalidInput(reason) => format!("Invalid input: {reason}"),
            Self::BadRequest(reason) => reason.clone(),
            Self::Internal => "Internal server error occurred".into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorRes {
                detail: self.detail(),
            }),
        )
            .into_response()
    }
}

/// Turns a handler panic into a 500 with the generic error body.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = message, "handler panicked");
    ApiError::Internal.into_response()
}
