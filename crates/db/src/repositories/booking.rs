use crate::models::DbBooking;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn find_booked_table_ids(
    pool: &Pool<Postgres>,
    booking_date: &str,
    booking_time: &str,
) -> Result<Vec<i32>> {
    let table_ids = sqlx::query_scalar::<_, i32>(
        r#"
        SELECT table_id
        FROM bookings
        WHERE booking_date = $1 AND booking_time = $2
        "#,
    )
    .bind(booking_date)
    .bind(booking_time)
    .fetch_all(pool)
    .await?;

    Ok(table_ids)
}

/// Inserts a booking inside its own transaction. A unique violation on
/// (table_id, booking_date, booking_time) surfaces as a `sqlx::Error`
/// wrapped in the returned report, and nothing is committed.
pub async fn insert_booking(
    pool: &Pool<Postgres>,
    table_id: i32,
    customer_name: &str,
    guests: i32,
    booking_date: &str,
    booking_time: &str,
) -> Result<DbBooking> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating booking: id={}, table_id={}, date={}, time={}",
        id, table_id, booking_date, booking_time
    );

    let mut tx = pool.begin().await?;

    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (id, table_id, customer_name, guests, booking_date, booking_time, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, table_id, customer_name, guests, booking_date, booking_time, created_at
        "#,
    )
    .bind(id)
    .bind(table_id)
    .bind(customer_name)
    .bind(guests)
    .bind(booking_date)
    .bind(booking_time)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::debug!("Booking created successfully: id={}", id);
    Ok(booking)
}

pub async fn get_bookings_for_slot(
    pool: &Pool<Postgres>,
    booking_date: &str,
    booking_time: &str,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, table_id, customer_name, guests, booking_date, booking_time, created_at
        FROM bookings
        WHERE booking_date = $1 AND booking_time = $2
        ORDER BY created_at ASC
        "#,
    )
    .bind(booking_date)
    .bind(booking_time)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}
