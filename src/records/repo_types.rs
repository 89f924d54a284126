use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Data record as stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DataRecord {
    pub id: Uuid,
    pub title: String,
    pub category: Option<String>,
    pub payload: Option<String>,
    pub created_by: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Aggregate row for one category: how many records it has and when the most
/// recent one was created. Derived by GROUP BY, never persisted.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryStat {
    pub category: String,
    pub count: i64,
    pub latest: OffsetDateTime,
}
