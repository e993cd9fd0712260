use std::collections::HashSet;

use async_trait::async_trait;

use crate::{
    errors::BookingResult,
    models::{
        booking::{Booking, NewBooking, Slot},
        table::Table,
    },
};

/// Persistence operations the allocator depends on.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Every table, in no particular order.
    async fn list_tables(&self) -> BookingResult<Vec<Table>>;

    /// Ids of tables that already hold a booking for exactly this slot.
    async fn find_booked_tables(&self, slot: &Slot) -> BookingResult<HashSet<i32>>;

    /// Records `booking` against `table_id` in a single transaction.
    ///
    /// Returns [`BookingError::SlotConflict`](crate::errors::BookingError::SlotConflict)
    /// when the (table, date, time) triple is already taken. Nothing is
    /// written in that case.
    async fn insert_booking(&self, booking: &NewBooking, table_id: i32) -> BookingResult<Booking>;
}
