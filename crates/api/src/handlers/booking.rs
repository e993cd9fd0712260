use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use std::sync::Arc;
use tablebook_core::{
    models::{
        MessageResponse,
        booking::{Allocation, BookTableRequest, NewBooking},
    },
    notify::dispatch,
};
use tracing::warn;

use crate::{ApiState, middleware::error_handling::AppError};

pub const NO_TABLES_MESSAGE: &str = "Sorry, no tables are available for that time and party size.";

/// Books the best-fitting free table for the requested slot.
///
/// # Endpoint
///
/// ```text
/// POST /book_table
/// {"name": "Alice", "guests": 3, "date": "2024-06-01", "time": "19:00"}
/// ```
///
/// * `201` - booked; the restaurant is notified on a best-effort basis
/// * `409` - no table seats the party for that slot
/// * `400` - malformed body, missing field or invalid guest count
/// * `500` - the booking could not be stored
#[axum::debug_handler]
pub async fn book_table(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<BookTableRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(payload) = payload?;
    let request = NewBooking::try_from(payload)?;

    match state.allocator.allocate(&request).await? {
        Allocation::Booked(booking) => {
            // The booking stands whether or not the email goes out
            if let Err(e) = dispatch(state.notifier.as_ref(), &booking.notification()).await {
                warn!("Booking {} saved but notification failed: {}", booking.id, e);
            }

            Ok((
                StatusCode::CREATED,
                Json(MessageResponse::new(booking.confirmation_message())),
            ))
        }
        Allocation::Unavailable => Ok((
            StatusCode::CONFLICT,
            Json(MessageResponse::new(NO_TABLES_MESSAGE)),
        )),
    }
}
