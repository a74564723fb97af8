//! Terminology mapping and FHIR resource engine
//!
//! Unifies the NAMASTE traditional-medicine code set, the WHO ICD-11
//! Traditional Medicine Module 2 (TM2) and a biomedicine code set (BMS):
//!
//! - [`Catalog`]: immutable hierarchical index of code groups
//! - [`search`]: group search and flattened auto-complete lookup
//! - [`mapping`]: synthetic TM2/BMS identifiers for unmapped rows
//! - [`translate`]: code translation between vocabularies via the catalog
//! - [`builder`]: CodeSystem, ConceptMap and Bundle generation
//! - [`ingest`]: catalog checks over uploaded encounter Bundles
//! - [`TerminologyEngine`]: the facade composing all of the above
//!
//! Every operation except catalog loading is total: malformed or empty input
//! produces partial or empty, but well-formed, output.
//!
//! ```rust
//! use ayush_terminology::{Catalog, TerminologyEngine};
//!
//! let engine = TerminologyEngine::new(Catalog::builtin());
//! let groups = engine.search("diab");
//! assert_eq!(groups[0].name, "Metabolic Disorders");
//! ```

#![forbid(unsafe_code)]

pub mod builder;
pub mod catalog;
mod engine;
mod error;
pub mod import;
pub mod ingest;
pub mod mapping;
mod model;
pub mod search;
mod session;
pub mod translate;

pub use builder::BuilderOptions;
pub use catalog::Catalog;
pub use engine::{EngineOptions, GroupSelection, TerminologyEngine};
pub use error::{Error, Result, ValidationError};
pub use import::{RowIssue, RowIssueKind};
pub use ingest::{CodingIssue, CodingIssueKind, IngestReport, IngestStatus};
pub use mapping::SyntheticIds;
pub use model::{CodeEntry, CodeGroup, CodeSystemKind, Subject, TabularRow, UnknownSystem};
pub use search::{LookupOptions, Suggestion};
pub use session::Session;
pub use translate::{Direction, Translation};
