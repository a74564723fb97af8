//! `$generate` operations producing FHIR resources

use crate::{
    api::{extractors::JsonBody, resource_formatter::FhirJson},
    state::AppState,
};
use ayush_models::common::{Bundle, CodeSystem, ConceptMap};
use ayush_terminology::{CodeEntry, Subject, TabularRow};
use axum::extract::State;
use serde::Deserialize;

/// POST /fhir/CodeSystem/$generate
pub async fn generate_code_system(
    State(state): State<AppState>,
    JsonBody(rows): JsonBody<Vec<TabularRow>>,
) -> FhirJson<CodeSystem> {
    FhirJson(state.engine.generate_code_system(&rows))
}

/// POST /fhir/ConceptMap/$generate
pub async fn generate_concept_map(
    State(state): State<AppState>,
    JsonBody(rows): JsonBody<Vec<TabularRow>>,
) -> FhirJson<ConceptMap> {
    FhirJson(state.engine.generate_concept_map(&rows))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BundleRequest {
    pub subject: Option<Subject>,
    pub problem_list: Vec<CodeEntry>,
}

/// POST /fhir/Bundle/$generate
pub async fn generate_bundle(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<BundleRequest>,
) -> FhirJson<Bundle> {
    FhirJson(
        state
            .engine
            .generate_bundle(request.subject.as_ref(), &request.problem_list),
    )
}
