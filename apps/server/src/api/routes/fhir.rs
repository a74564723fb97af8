//! FHIR operation routes, mounted under `/fhir`
//!
//! Type-level `$generate` operations build a resource from the request body
//! without storing it.

use crate::api::handlers::fhir;
use crate::state::AppState;
use axum::{routing::post, Router};

pub fn fhir_routes() -> Router<AppState> {
    Router::new()
        .route("/CodeSystem/$generate", post(fhir::generate_code_system))
        .route("/ConceptMap/$generate", post(fhir::generate_concept_map))
        .route("/Bundle/$generate", post(fhir::generate_bundle))
}
