//! Catalog browsing, auto-complete and code translation

use crate::{
    api::{
        extractors::{JsonBody, QueryParams},
        resource_formatter::FhirJson,
    },
    state::AppState,
    Error, Result,
};
use ayush_models::common::CodeSystem;
use ayush_terminology::{
    CodeGroup, CodeSystemKind, Direction, LookupOptions, Suggestion, Translation,
};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NamasteCodesParams {
    pub version: Option<String>,
}

/// The catalog as a CodeSystem (GET /api/namaste-codes)
pub async fn namaste_codes(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<NamasteCodesParams>,
) -> FhirJson<CodeSystem> {
    FhirJson(state.engine.catalog_code_system(params.version.as_deref()))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub term: String,
}

/// Groups whose name or child names contain `term` (GET /api/search)
pub async fn search(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchParams>,
) -> Json<Vec<CodeGroup>> {
    Json(state.engine.search(&params.term).into_iter().cloned().collect())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LookupParams {
    pub term: String,
    pub limit: Option<usize>,
    pub system: Option<String>,
}

/// Auto-complete suggestions (GET /api/lookup)
pub async fn lookup(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<LookupParams>,
) -> Result<Json<Vec<Suggestion>>> {
    let system = params
        .system
        .as_deref()
        .map(str::parse::<CodeSystemKind>)
        .transpose()
        .map_err(|e| Error::Validation(e.to_string()))?;

    let options = LookupOptions {
        limit: params.limit,
        system,
    };
    Ok(Json(state.engine.lookup(&params.term, &options)))
}

/// A group's parent and children, by parent code or group name (GET /api/groups/:id)
pub async fn group(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let selection = state
        .engine
        .select_group(&id)
        .ok_or_else(|| Error::NotFound(format!("Code group '{id}'")))?;
    Ok(Json(serde_json::to_value(selection)?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub source_code: String,
    pub direction: Direction,
}

/// Translate a code between NAMASTE and TM2 / biomedicine (POST /api/translate)
pub async fn translate(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<TranslateRequest>,
) -> Result<Json<Translation>> {
    state
        .engine
        .translate(&request.source_code, request.direction)
        .map(Json)
        .ok_or_else(|| {
            let (source, target) = request.direction.systems();
            Error::NotFound(format!(
                "No {target} translation for {source} code '{}'",
                request.source_code
            ))
        })
}
