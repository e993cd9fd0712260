pub mod booking;
pub mod table;

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::error::DatabaseError;
use tablebook_core::{
    errors::{BookingError, BookingResult},
    models::{
        booking::{Booking, NewBooking, Slot},
        table::Table,
    },
    repository::BookingRepository,
};

use crate::DbPool;

/// [`BookingRepository`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgBookingRepository {
    pool: DbPool,
}

impl PgBookingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn list_tables(&self) -> BookingResult<Vec<Table>> {
        let tables = table::list_tables(&self.pool).await?;
        Ok(tables.into_iter().map(Table::from).collect())
    }

    async fn find_booked_tables(&self, slot: &Slot) -> BookingResult<HashSet<i32>> {
        let ids = booking::find_booked_table_ids(&self.pool, &slot.date, &slot.time).await?;
        Ok(ids.into_iter().collect())
    }

    async fn insert_booking(&self, request: &NewBooking, table_id: i32) -> BookingResult<Booking> {
        let result = booking::insert_booking(
            &self.pool,
            table_id,
            &request.customer_name,
            request.guests,
            &request.slot.date,
            &request.slot.time,
        )
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(report) if is_unique_violation(&report) => Err(BookingError::SlotConflict {
                table_id,
                date: request.slot.date.clone(),
                time: request.slot.time.clone(),
            }),
            Err(report) => Err(BookingError::Database(report)),
        }
    }
}

fn is_unique_violation(report: &eyre::Report) -> bool {
    match report.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
        _ => false,
    }
}
