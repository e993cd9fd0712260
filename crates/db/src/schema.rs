use eyre::{Result, WrapErr, eyre};
use sqlx::{Pool, Postgres};
use tracing::info;

/// Seating layout used by `db-migrate` when `TABLE_CAPACITIES` is unset.
pub const DEFAULT_TABLE_CAPACITIES: &[i32] = &[2, 2, 4, 4, 6, 8];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create restaurant_tables table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS restaurant_tables (
            id SERIAL PRIMARY KEY,
            capacity INTEGER NOT NULL,
            CONSTRAINT positive_capacity CHECK (capacity > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            table_id INTEGER NOT NULL REFERENCES restaurant_tables(id),
            customer_name VARCHAR(100) NOT NULL,
            guests INTEGER NOT NULL,
            booking_date VARCHAR(20) NOT NULL,
            booking_time VARCHAR(20) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_guests CHECK (guests > 0),
            CONSTRAINT bookings_table_date_time_uc UNIQUE (table_id, booking_date, booking_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Availability lookups filter on the slot alone
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_bookings_slot ON bookings(booking_date, booking_time);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}

/// Inserts one table per entry of `capacities`, but only into an empty
/// `restaurant_tables`. Returns the number of tables created.
pub async fn seed_tables(pool: &Pool<Postgres>, capacities: &[i32]) -> Result<u64> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM restaurant_tables")
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        info!("Skipping table seeding: {} tables already exist", existing);
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    for capacity in capacities {
        sqlx::query("INSERT INTO restaurant_tables (capacity) VALUES ($1)")
            .bind(capacity)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    info!("Seeded {} restaurant tables", capacities.len());
    Ok(capacities.len() as u64)
}

/// Parses a comma-separated capacity list such as `"2,4,4,6"`.
pub fn parse_capacities(raw: &str) -> Result<Vec<i32>> {
    let capacities = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let capacity: i32 = part
                .parse()
                .wrap_err_with(|| format!("Invalid table capacity: {}", part))?;
            if capacity < 1 {
                return Err(eyre!("Table capacity must be positive, got {}", capacity));
            }
            Ok(capacity)
        })
        .collect::<Result<Vec<_>>>()?;

    if capacities.is_empty() {
        return Err(eyre!("At least one table capacity is required"));
    }

    Ok(capacities)
}
