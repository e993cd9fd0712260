use axum::{Json, extract::State, extract::rejection::JsonRejection};
use std::sync::Arc;
use tablebook_core::{
    errors::BookingError,
    models::{
        MessageResponse,
        order::{Order, PlaceOrderRequest},
    },
    notify::dispatch,
};
use tracing::info;

use crate::{ApiState, middleware::error_handling::AppError};

pub const NOTIFICATION_FAILED_MESSAGE: &str = "Failed to send notification email.";

/// Forwards a food order to the restaurant by email. Nothing is stored, so
/// the outcome is exactly the outcome of the delivery.
#[axum::debug_handler]
pub async fn place_order(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(payload) = payload?;
    let order = Order::try_from(payload)?;

    dispatch(state.notifier.as_ref(), &order.notification())
        .await
        .map_err(|e| BookingError::Notification(format!("{:#}", e)))?;

    info!("Order from {} forwarded", order.name);
    Ok(Json(MessageResponse::new("Order received and email sent.")))
}
