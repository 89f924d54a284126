pub use crate::records::repo_types::{CategoryStat, DataRecord};
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

pub async fn create(
    db: &PgPool,
    title: &str,
    category: Option<&str>,
    payload: Option<&str>,
    created_by: Uuid,
) -> anyhow::Result<DataRecord> {
    let record = sqlx::query_as::<_, DataRecord>(
        r#"
        INSERT INTO data_records (title, category, payload, created_by)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, category, payload, created_by, created_at
        "#,
    )
    .bind(title)
    .bind(category)
    .bind(payload)
    .bind(created_by)
    .fetch_one(db)
    .await?;
    Ok(record)
}

/// Newest first, offset applied before limit.
pub async fn list(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<DataRecord>> {
    let rows = sqlx::query_as::<_, DataRecord>(
        r#"
        SELECT id, title, category, payload, created_by, created_at
        FROM data_records
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// All provided filters are ANDed; an unset filter imposes no constraint.
/// Date bounds are inclusive on both ends.
pub async fn search(
    db: &PgPool,
    category: Option<&str>,
    start_date: Option<OffsetDateTime>,
    end_date: Option<OffsetDateTime>,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<DataRecord>> {
    let rows = sqlx::query_as::<_, DataRecord>(
        r#"
        SELECT id, title, category, payload, created_by, created_at
        FROM data_records
        WHERE ($1::text IS NULL OR category = $1)
          AND ($2::timestamptz IS NULL OR created_at >= $2)
          AND ($3::timestamptz IS NULL OR created_at <= $3)
        ORDER BY created_at DESC
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(category)
    .bind(start_date)
    .bind(end_date)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// One row per category present in storage. Records without a category have
/// no label to group under and are left out.
pub async fn stats(db: &PgPool) -> anyhow::Result<Vec<CategoryStat>> {
    let rows = sqlx::query_as::<_, CategoryStat>(
        r#"
        SELECT category, COUNT(*) AS count, MAX(created_at) AS latest
        FROM data_records
        WHERE category IS NOT NULL
        GROUP BY category
        ORDER BY category
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}
