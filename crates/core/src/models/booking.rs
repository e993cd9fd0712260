use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::required_text;
use crate::{
    errors::{BookingError, BookingResult},
    notify::Notification,
};

/// Column widths of the `bookings` table.
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_SLOT_FIELD_LEN: usize = 20;

/// The (date, time) pair a booking is keyed on. Both halves are kept as the
/// caller sent them; two slots are the same only if both strings match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub date: String,
    pub time: String,
}

impl Slot {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
        }
    }
}

/// Raw `POST /book_table` body. Every field is optional here so that a
/// missing field turns into a validation message instead of a JSON error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookTableRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub guests: Value,
    pub date: Option<String>,
    pub time: Option<String>,
}

/// A validated booking request, ready for allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub customer_name: String,
    pub guests: i32,
    pub slot: Slot,
}

impl TryFrom<BookTableRequest> for NewBooking {
    type Error = BookingError;

    fn try_from(request: BookTableRequest) -> BookingResult<Self> {
        let guests = parse_guest_count(&request.guests)?;
        let customer_name = required_text("name", request.name, Some(MAX_NAME_LEN))?;
        let date = required_text("date", request.date, Some(MAX_SLOT_FIELD_LEN))?;
        let time = required_text("time", request.time, Some(MAX_SLOT_FIELD_LEN))?;

        Ok(Self {
            customer_name,
            guests,
            slot: Slot { date, time },
        })
    }
}

/// Reads a party size from JSON. Integers, floats without a fractional part
/// and numeric strings are accepted; anything else, and anything below one,
/// is rejected.
pub fn parse_guest_count(value: &Value) -> BookingResult<i32> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Null => {
            return Err(BookingError::validation("guests is required"));
        }
        _ => None,
    };

    let guests = parsed
        .ok_or_else(|| BookingError::validation("guests must be a whole number"))?;

    if guests < 1 {
        return Err(BookingError::validation("guests must be at least 1"));
    }

    i32::try_from(guests).map_err(|_| BookingError::validation("guests is too large"))
}

/// A persisted reservation of one table for one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub table_id: i32,
    pub customer_name: String,
    pub guests: i32,
    pub booking_date: String,
    pub booking_time: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn slot(&self) -> Slot {
        Slot::new(&self.booking_date, &self.booking_time)
    }

    pub fn confirmation_message(&self) -> String {
        format!(
            "Table for {} booked successfully for {}!",
            self.guests, self.customer_name
        )
    }

    pub fn notification(&self) -> Notification {
        Notification {
            subject: format!("New Table Booking from {}", self.customer_name),
            body: format!(
                "A new reservation has been confirmed and saved to the database:\n\
                 Name: {}\n\
                 Number of Guests: {}\n\
                 Date: {}\n\
                 Time: {}\n\
                 Assigned Table ID: {}\n",
                self.customer_name, self.guests, self.booking_date, self.booking_time, self.table_id
            ),
        }
    }
}

/// Result of an allocation attempt. `Unavailable` is an expected outcome,
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Allocation {
    Booked(Booking),
    Unavailable,
}

impl Allocation {
    pub fn is_booked(&self) -> bool {
        matches!(self, Allocation::Booked(_))
    }
}
