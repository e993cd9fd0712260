//! # Error Handling Middleware
//!
//! Maps [`BookingError`] to HTTP status codes and `{"message": ...}` bodies so
//! every endpoint reports failures the same way.
//!
//! Server-side failures are logged in full and answered with a generic
//! message; the caller never sees database or relay internals.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tablebook_core::{errors::BookingError, models::MessageResponse};
use tracing::error;

use crate::handlers::{booking::NO_TABLES_MESSAGE, order::NOTIFICATION_FAILED_MESSAGE};

pub const SERVER_ERROR_MESSAGE: &str = "Could not process booking due to a server error.";

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use tablebook_api::middleware::error_handling::AppError;
/// use tablebook_core::{errors::BookingError, models::MessageResponse};
///
/// async fn handler(guests: i32) -> Result<Json<MessageResponse>, AppError> {
///     if guests < 1 {
///         return Err(AppError(BookingError::validation("guests must be at least 1")));
///     }
///     Ok(Json(MessageResponse::new("ok")))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            BookingError::Validation(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            BookingError::SlotConflict { .. } => (StatusCode::CONFLICT, NO_TABLES_MESSAGE.to_string()),
            BookingError::Notification(_) => {
                error!("Notification failed: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    NOTIFICATION_FAILED_MESSAGE.to_string(),
                )
            }
            BookingError::Database(_) | BookingError::Internal(_) => {
                error!("Request failed: {:?}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SERVER_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// A body that is not JSON, or not the expected shape, is malformed input.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(BookingError::Validation(rejection.body_text()))
    }
}
