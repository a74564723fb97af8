//! FHIR data models
//!
//! This crate provides strongly-typed Rust structures for the FHIR resources
//! produced by the terminology engine.
//!
//! # Module Organization
//!
//! - `common`: Minimal, version-agnostic shapes for CodeSystem, ConceptMap,
//!   Bundle and the clinical resources carried inside a Bundle
//!
//! # Design Philosophy
//!
//! - **Minimal skeletons**: Only the fields downstream FHIR consumers need
//! - **Extensible**: `extensions` field captures additional properties on the
//!   terminology resources
//! - **Exact wire names**: serde renames keep `resourceType`, `concept`,
//!   `group`, `entry` and friends byte-compatible with FHIR JSON
//!
//! # Example
//!
//! ```rust
//! use ayush_models::common::{CodeSystem, CodeSystemContentMode, PublicationStatus};
//! use serde_json::json;
//!
//! let cs_json = json!({
//!     "resourceType": "CodeSystem",
//!     "id": "namaste",
//!     "status": "active",
//!     "content": "complete",
//!     "concept": [
//!         { "code": "A01", "display": "Alpha", "definition": "Represents first type" }
//!     ]
//! });
//!
//! let cs: CodeSystem = serde_json::from_value(cs_json).unwrap();
//! assert_eq!(cs.status, PublicationStatus::Active);
//! assert_eq!(cs.content, CodeSystemContentMode::Complete);
//! assert_eq!(cs.concepts().len(), 1);
//! ```

pub mod common;

// Re-export commonly used types
pub use common::*;
