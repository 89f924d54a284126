use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::records::repo_types::CategoryStat;

#[derive(Debug, Deserialize)]
pub struct CreateRecordRequest {
    pub title: String,
    pub category: Option<String>,
    pub payload: Option<String>,
    pub created_by: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// Query parameters for filtered search. Dates are RFC 3339 and inclusive.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub category: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_date: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

#[derive(Debug, Serialize)]
pub struct CategoryStatEntry {
    pub count: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub latest: OffsetDateTime,
}

/// Shape the aggregate rows as `category -> {count, latest}`.
pub fn stats_response(rows: Vec<CategoryStat>) -> BTreeMap<String, CategoryStatEntry> {
    rows.into_iter()
        .map(|s| {
            (
                s.category,
                CategoryStatEntry {
                    count: s.count,
                    latest: s.latest,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn pagination_defaults() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.limit, 50);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn search_query_defaults_leave_filters_unset() {
        let q: SearchQuery = serde_json::from_str("{}").unwrap();
        assert!(q.category.is_none());
        assert!(q.start_date.is_none());
        assert!(q.end_date.is_none());
        assert_eq!(q.limit, 50);
        assert_eq!(q.offset, 0);
    }

    #[test]
    fn search_query_parses_rfc3339_bounds() {
        let q: SearchQuery = serde_json::from_str(
            r#"{"category":"x","start_date":"2024-01-01T00:00:00Z","end_date":"2024-02-01T12:30:00Z"}"#,
        )
        .unwrap();
        assert_eq!(q.category.as_deref(), Some("x"));
        assert_eq!(q.start_date, Some(datetime!(2024-01-01 00:00:00 UTC)));
        assert_eq!(q.end_date, Some(datetime!(2024-02-01 12:30:00 UTC)));
    }

    #[test]
    fn stats_response_maps_rows_by_category() {
        let rows = vec![
            CategoryStat {
                category: "a".into(),
                count: 2,
                latest: datetime!(2024-01-05 00:00:00 UTC),
            },
            CategoryStat {
                category: "b".into(),
                count: 1,
                latest: datetime!(2024-01-03 00:00:00 UTC),
            },
        ];

        let map = stats_response(rows);
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"].count, 2);
        assert_eq!(map["a"].latest, datetime!(2024-01-05 00:00:00 UTC));
        assert_eq!(map["b"].count, 1);

        let json = serde_json::to_string(&map).unwrap();
        assert!(json.contains(r#""a":{"count":2,"latest":"2024-01-05T00:00:00Z"}"#));
    }

    #[test]
    fn stats_response_is_empty_for_no_rows() {
        assert!(stats_response(Vec::new()).is_empty());
    }
}
