//! Engine facade

use crate::builder::{self, BuilderOptions};
use crate::catalog::Catalog;
use crate::error::Result;
use crate::import::{self, RowIssue};
use crate::ingest::{self, IngestReport};
use crate::mapping::{self, SyntheticIds};
use crate::model::{CodeEntry, CodeGroup, Subject, TabularRow};
use crate::search::{self, LookupOptions, Suggestion};
use crate::translate::{self, Direction, Translation};
use ayush_models::common::{Bundle, CodeSystem, ConceptMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub builder: BuilderOptions,
    pub synthetic_ids: SyntheticIds,
}

/// A selected group's supertype and subtypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupSelection<'a> {
    pub parent: &'a CodeEntry,
    pub children: &'a [CodeEntry],
}

/// Search, mapping, translation and resource generation over one catalog.
///
/// Holds only the immutable catalog and fixed options, so one instance can be
/// shared by any number of callers. Per-user state lives in [`crate::Session`].
#[derive(Debug, Clone)]
pub struct TerminologyEngine {
    catalog: Arc<Catalog>,
    options: EngineOptions,
}

impl TerminologyEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_options(catalog, EngineOptions::default())
    }

    pub fn with_options(catalog: Catalog, options: EngineOptions) -> Self {
        tracing::debug!(
            groups = catalog.len(),
            synthetic_ids = ?options.synthetic_ids,
            "Terminology engine created"
        );
        Self {
            catalog: Arc::new(catalog),
            options,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn search(&self, term: &str) -> Vec<&CodeGroup> {
        search::search(&self.catalog, term)
    }

    pub fn lookup(&self, term: &str, options: &LookupOptions) -> Vec<Suggestion> {
        search::lookup(&self.catalog, term, options)
    }

    pub fn select_group(&self, group_id: &str) -> Option<GroupSelection<'_>> {
        self.catalog.group(group_id).map(|group| GroupSelection {
            parent: &group.parent,
            children: &group.children,
        })
    }

    pub fn translate(&self, source_code: &str, direction: Direction) -> Option<Translation> {
        translate::translate(&self.catalog, source_code, direction)
    }

    /// Fill missing TM2/BMS codes with the configured synthetic-id strategy
    pub fn generate_mappings(&self, rows: &[TabularRow]) -> Vec<TabularRow> {
        mapping::fill_mappings_with(rows, self.options.synthetic_ids)
    }

    pub fn generate_code_system(&self, rows: &[TabularRow]) -> CodeSystem {
        builder::build_code_system(rows, &self.options.builder)
    }

    pub fn generate_concept_map(&self, rows: &[TabularRow]) -> ConceptMap {
        builder::build_concept_map(rows, &self.options.builder)
    }

    pub fn generate_bundle(&self, subject: Option<&Subject>, problem_list: &[CodeEntry]) -> Bundle {
        builder::build_bundle(subject, problem_list)
    }

    pub fn catalog_code_system(&self, version: Option<&str>) -> CodeSystem {
        builder::build_catalog_code_system(&self.catalog, &self.options.builder, version)
    }

    pub fn import_rows(&self, csv_text: &str) -> Result<Vec<TabularRow>> {
        import::parse_rows(csv_text)
    }

    pub fn validate_rows(&self, rows: &[TabularRow]) -> Vec<RowIssue> {
        import::validate_rows(rows)
    }

    /// Parse an encounter Bundle and check its Condition codings; nothing is kept
    pub fn ingest_bundle(&self, bundle: &Value) -> Result<IngestReport> {
        let bundle = Bundle::from_value(bundle)?;
        ingest::ingest_bundle(&self.catalog, &bundle)
    }
}
