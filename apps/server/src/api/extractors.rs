//! Extractors whose rejections render as OperationOutcome

use crate::Error;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON request body; accepts `application/json` and `application/fhir+json`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

/// Query string parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct QueryParams<T>(pub T);
