use crate::models::DbTable;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn list_tables(pool: &Pool<Postgres>) -> Result<Vec<DbTable>> {
    let tables = sqlx::query_as::<_, DbTable>(
        r#"
        SELECT id, capacity
        FROM restaurant_tables
        ORDER BY capacity ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(tables)
}

pub async fn create_table(pool: &Pool<Postgres>, capacity: i32) -> Result<DbTable> {
    let table = sqlx::query_as::<_, DbTable>(
        r#"
        INSERT INTO restaurant_tables (capacity)
        VALUES ($1)
        RETURNING id, capacity
        "#,
    )
    .bind(capacity)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Created table: id={}, capacity={}", table.id, table.capacity);
    Ok(table)
}
