use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ReadMode;
use crate::error::ApiError;
use crate::record::HotlistRecord;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/query", get(query_records))
}

/// `GET /query?timestamp=<integer>`: every record strictly newer than the
/// bound, in the source collection's order (newest first in cache mode).
async fn query_records(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<HotlistRecord>>, ApiError> {
    let min_ts = parse_timestamp_param(params.get("timestamp"))?;

    let matched = match state.config.read_mode {
        ReadMode::Cache => filter_newer(&state.snapshot().await, min_ts),
        ReadMode::File => filter_newer(&state.store.load(), min_ts),
    };
    Ok(Json(matched))
}

fn parse_timestamp_param(raw: Option<&String>) -> Result<i64, ApiError> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .ok_or(ApiError::InvalidTimestamp)
}

/// Records with `timestamp > min_ts`, order preserved.
fn filter_newer(records: &[HotlistRecord], min_ts: i64) -> Vec<HotlistRecord> {
    records
        .iter()
        .filter(|r| r.timestamp > min_ts)
        .cloned()
        .collect()
}
