pub mod booking;
pub mod order;
pub mod table;

use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};

/// Body returned by every endpoint, success or failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Trims a required text field, rejecting it when missing, blank or too long.
pub(crate) fn required_text(
    field: &str,
    value: Option<String>,
    max_len: Option<usize>,
) -> BookingResult<String> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| BookingError::validation(format!("{} is required", field)))?;

    if let Some(max) = max_len {
        if value.chars().count() > max {
            return Err(BookingError::validation(format!(
                "{} must be at most {} characters",
                field, max
            )));
        }
    }

    Ok(value)
}
