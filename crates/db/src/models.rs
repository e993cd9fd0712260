use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tablebook_core::models::{booking::Booking, table::Table};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTable {
    pub id: i32,
    pub capacity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub table_id: i32,
    pub customer_name: String,
    pub guests: i32,
    pub booking_date: String,
    pub booking_time: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbTable> for Table {
    fn from(row: DbTable) -> Self {
        Table {
            id: row.id,
            capacity: row.capacity,
        }
    }
}

impl From<DbBooking> for Booking {
    fn from(row: DbBooking) -> Self {
        Booking {
            id: row.id,
            table_id: row.table_id,
            customer_name: row.customer_name,
            guests: row.guests,
            booking_date: row.booking_date,
            booking_time: row.booking_time,
            created_at: row.created_at,
        }
    }
}
