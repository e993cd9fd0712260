//! # Table Allocation
//!
//! Decides which table, if any, a party gets for a slot, and records the
//! booking.
//!
//! ## Allocation Algorithm
//!
//! 1. Fetch the ids of tables already booked for the exact (date, time) pair
//! 2. Keep the tables that seat the party and are not in that set
//! 3. Pick the smallest sufficient capacity, breaking ties on the lowest id
//! 4. Insert the booking; the storage unique constraint on
//!    (table, date, time) has the final word
//!
//! Steps 1-3 are an optimistic pre-check. Two requests can both see the same
//! table as free; only one insert succeeds and the other is reported as
//! [`Allocation::Unavailable`]. The allocator does not retry against the
//! next-best table.

use std::{collections::HashSet, sync::Arc};

use tracing::{debug, info, warn};

use crate::{
    errors::{BookingError, BookingResult},
    models::{
        booking::{Allocation, NewBooking},
        table::Table,
    },
    repository::BookingRepository,
};

/// Returns the table that seats `guests` with the fewest spare seats,
/// skipping ids in `booked`. Equal capacities resolve to the lowest id.
pub fn select_table<'a>(tables: &'a [Table], booked: &HashSet<i32>, guests: i32) -> Option<&'a Table> {
    tables
        .iter()
        .filter(|table| table.seats(guests) && !booked.contains(&table.id))
        .min_by_key(|table| (table.capacity, table.id))
}

/// Allocates tables on top of a [`BookingRepository`].
pub struct TableAllocator<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> Clone for TableAllocator<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: BookingRepository + ?Sized> TableAllocator<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Books the best-fitting free table for `request`.
    ///
    /// # Errors
    ///
    /// * `BookingError::Validation` - `guests` is below one
    /// * `BookingError::Database` - the repository failed; nothing was written
    pub async fn allocate(&self, request: &NewBooking) -> BookingResult<Allocation> {
        if request.guests < 1 {
            return Err(BookingError::validation("guests must be at least 1"));
        }

        let booked = self.repository.find_booked_tables(&request.slot).await?;
        let tables = self.repository.list_tables().await?;

        debug!(
            "Allocating for {} guests on {} at {}: {} tables, {} booked",
            request.guests,
            request.slot.date,
            request.slot.time,
            tables.len(),
            booked.len()
        );

        let Some(table) = select_table(&tables, &booked, request.guests) else {
            info!(
                "No table for {} guests on {} at {}",
                request.guests, request.slot.date, request.slot.time
            );
            return Ok(Allocation::Unavailable);
        };

        match self.repository.insert_booking(request, table.id).await {
            Ok(booking) => {
                info!(
                    "Booked table {} for {} ({} guests) on {} at {}",
                    booking.table_id,
                    booking.customer_name,
                    booking.guests,
                    booking.booking_date,
                    booking.booking_time
                );
                Ok(Allocation::Booked(booking))
            }
            Err(err @ BookingError::SlotConflict { .. }) => {
                warn!("Lost allocation race: {}", err);
                Ok(Allocation::Unavailable)
            }
            Err(err) => Err(err),
        }
    }
}
