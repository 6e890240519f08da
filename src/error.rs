use crate::slot_time::{HourLabel, InvalidHourLabel, InvalidHourRange};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Everything a [`crate::backend::BookingBackend`] call can fail with.
///
/// `Validation` and `Conflict` are client-correctable and reported as 400;
/// both are raised before any write is visible. `Storage` is a server fault
/// (500) and is only returned after the surrounding transaction rolled back.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    /// Malformed date, hour label, or an empty/inverted range. Rejected
    /// before a transaction is opened.
    #[error("{0}")]
    Validation(String),

    /// The first requested hour that already has a stored slot row.
    #[error("Slot at {label} is already booked")]
    Conflict { label: HourLabel },

    /// Underlying persistence failure; the transaction was rolled back.
    #[error("{cause}")]
    Storage { cause: String },
}

impl BackendError {
    pub fn storage(cause: impl ToString) -> Self {
        BackendError::Storage {
            cause: cause.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            BackendError::Validation(_) | BackendError::Conflict { .. } => StatusCode::BAD_REQUEST,
            BackendError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<InvalidHourLabel> for BackendError {
    fn from(err: InvalidHourLabel) -> Self {
        BackendError::Validation(err.to_string())
    }
}

impl From<InvalidHourRange> for BackendError {
    fn from(err: InvalidHourRange) -> Self {
        BackendError::Validation(err.to_string())
    }
}

impl From<diesel::result::Error> for BackendError {
    fn from(err: diesel::result::Error) -> Self {
        BackendError::storage(err)
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            BackendError::Storage { cause } => {
                json!({ "message": "Request failed", "error": cause })
            }
            client_fault => json!({ "message": client_fault.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
