use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use tablebook_core::{
    errors::{BookingError, BookingResult},
    models::{
        booking::{Booking, NewBooking, Slot},
        table::Table,
    },
    repository::BookingRepository,
};
use tokio::sync::Mutex;
use uuid::Uuid;

/// A [`BookingRepository`] kept in memory. Enforces the same
/// (table, date, time) uniqueness as the `bookings` table.
pub struct InMemoryBookingRepository {
    tables: Vec<Table>,
    bookings: Mutex<Vec<Booking>>,
    stale_reads: bool,
}

impl InMemoryBookingRepository {
    /// Creates tables with ids `1..` in the order the capacities are given.
    pub fn with_capacities(capacities: &[i32]) -> Self {
        let tables = capacities
            .iter()
            .zip(1..)
            .map(|(&capacity, id)| Table { id, capacity })
            .collect();
        Self::with_tables(tables)
    }

    pub fn with_tables(tables: Vec<Table>) -> Self {
        Self {
            tables,
            bookings: Mutex::new(Vec::new()),
            stale_reads: false,
        }
    }

    /// Makes `find_booked_tables` report every table as free, so allocation
    /// always reaches the insert. Simulates a reader that lost a race.
    pub fn with_stale_reads(mut self) -> Self {
        self.stale_reads = true;
        self
    }

    pub async fn bookings(&self) -> Vec<Booking> {
        self.bookings.lock().await.clone()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn list_tables(&self) -> BookingResult<Vec<Table>> {
        Ok(self.tables.clone())
    }

    async fn find_booked_tables(&self, slot: &Slot) -> BookingResult<HashSet<i32>> {
        if self.stale_reads {
            return Ok(HashSet::new());
        }

        let bookings = self.bookings.lock().await;
        Ok(bookings
            .iter()
            .filter(|b| b.booking_date == slot.date && b.booking_time == slot.time)
            .map(|b| b.table_id)
            .collect())
    }

    async fn insert_booking(&self, request: &NewBooking, table_id: i32) -> BookingResult<Booking> {
        if !self.tables.iter().any(|t| t.id == table_id) {
            return Err(BookingError::Database(eyre::eyre!(
                "table {} does not exist",
                table_id
            )));
        }

        let mut bookings = self.bookings.lock().await;
        let taken = bookings.iter().any(|b| {
            b.table_id == table_id
                && b.booking_date == request.slot.date
                && b.booking_time == request.slot.time
        });
        if taken {
            return Err(BookingError::SlotConflict {
                table_id,
                date: request.slot.date.clone(),
                time: request.slot.time.clone(),
            });
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            table_id,
            customer_name: request.customer_name.clone(),
            guests: request.guests,
            booking_date: request.slot.date.clone(),
            booking_time: request.slot.time.clone(),
            created_at: Utc::now(),
        };
        bookings.push(booking.clone());

        Ok(booking)
    }
}
