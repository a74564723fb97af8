//! Encounter upload

use crate::{api::extractors::JsonBody, state::AppState, Result};
use ayush_terminology::IngestReport;
use axum::{extract::State, Json};
use serde_json::Value;

/// POST /api/encounter/upload
///
/// Accepts a transaction or collection Bundle and reports how its Condition
/// codings line up with the catalog. The Bundle is not stored.
pub async fn upload(
    State(state): State<AppState>,
    JsonBody(bundle): JsonBody<Value>,
) -> Result<Json<IngestReport>> {
    Ok(Json(state.engine.ingest_bundle(&bundle)?))
}
