//! Tabular row import and synthetic mapping

use crate::{
    api::extractors::{JsonBody, QueryParams},
    state::AppState,
    Result,
};
use ayush_terminology::{RowIssue, TabularRow};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Fill missing TM2/BMS codes (POST /api/mappings)
pub async fn generate_mappings(
    State(state): State<AppState>,
    JsonBody(rows): JsonBody<Vec<TabularRow>>,
) -> Json<Vec<TabularRow>> {
    Json(state.engine.generate_mappings(&rows))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportParams {
    /// Also fill missing mappings on the imported rows
    pub fill_mappings: bool,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub rows: Vec<TabularRow>,
    pub issues: Vec<RowIssue>,
}

/// Parse CSV text into rows plus advisory issues (POST /api/import)
pub async fn import(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ImportParams>,
    body: String,
) -> Result<Json<ImportResponse>> {
    let mut rows = state.engine.import_rows(&body)?;
    let issues = state.engine.validate_rows(&rows);
    if params.fill_mappings {
        rows = state.engine.generate_mappings(&rows);
    }

    tracing::debug!(
        rows = rows.len(),
        issues = issues.len(),
        fill_mappings = params.fill_mappings,
        "CSV import processed"
    );
    Ok(Json(ImportResponse { rows, issues }))
}
