use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::state::AppState;

use super::dto::{stats_response, CategoryStatEntry, CreateRecordRequest, Pagination, SearchQuery};
use super::repo::{self, DataRecord};

pub fn read_router() -> Router<AppState> {
    Router::new()
        .route("/records", get(list_records))
        .route("/records/search", get(search_records))
        .route("/records/stats", get(record_stats))
}

pub fn write_router() -> Router<AppState> {
    Router::new().route("/records", post(create_record))
}

#[instrument(skip(state, payload))]
pub async fn create_record(
    State(state): State<AppState>,
    Json(payload): Json<CreateRecordRequest>,
) -> Result<(StatusCode, Json<DataRecord>), (StatusCode, String)> {
    let record = repo::create(
        &state.db,
        &payload.title,
        payload.category.as_deref(),
        payload.payload.as_deref(),
        payload.created_by,
    )
    .await
    .map_err(internal)?;

    info!(record_id = %record.id, created_by = %record.created_by, "record created");
    Ok((StatusCode::CREATED, Json(record)))
}

#[instrument(skip(state))]
pub async fn list_records(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<DataRecord>>, (StatusCode, String)> {
    let records = repo::list(&state.db, p.limit, p.offset)
        .await
        .map_err(internal)?;
    Ok(Json(records))
}

#[instrument(skip(state))]
pub async fn search_records(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<DataRecord>>, (StatusCode, String)> {
    let records = repo::search(
        &state.db,
        q.category.as_deref(),
        q.start_date,
        q.end_date,
        q.limit,
        q.offset,
    )
    .await
    .map_err(internal)?;
    Ok(Json(records))
}

#[instrument(skip(state))]
pub async fn record_stats(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, CategoryStatEntry>>, (StatusCode, String)> {
    let rows = repo::stats(&state.db).await.map_err(internal)?;
    Ok(Json(stats_response(rows)))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
