//! FHIR resource responses

use crate::Error;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub const FHIR_JSON: &str = "application/fhir+json; charset=utf-8";

/// Serializes a FHIR resource with the `application/fhir+json` content type
#[derive(Debug)]
pub struct FhirJson<T>(pub T);

impl<T: Serialize> IntoResponse for FhirJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, HeaderValue::from_static(FHIR_JSON))],
                body,
            )
                .into_response(),
            Err(e) => Error::Serialization(e).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ayush_models::common::{Bundle, BundleType};

    #[tokio::test]
    async fn resources_use_fhir_content_type() {
        let response = FhirJson(Bundle::new(BundleType::Collection)).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], FHIR_JSON);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["type"], "collection");
    }
}
