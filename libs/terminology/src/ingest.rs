//! Encounter Bundle ingestion
//!
//! Reads a dual-coded encounter Bundle (NAMASTE plus TM2 or biomedicine on each
//! Condition), checks every coding against the catalog and reports what it
//! found. Nothing is stored; the report is the only output.

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::model::CodeSystemKind;
use ayush_models::common::{Bundle, BundleType, Coding, Condition};
use serde::{Deserialize, Serialize};

/// Bundle types an encounter upload may use
pub const ACCEPTED_BUNDLE_TYPES: [BundleType; 2] =
    [BundleType::Transaction, BundleType::Collection];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestStatus {
    Success,
    /// Accepted, but at least one coding issue was reported
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CodingIssueKind {
    /// The Condition carries no coding at all
    NoCoding,
    /// No NAMASTE coding, or no TM2/biomedicine coding beside it
    MissingDualCoding,
    UnknownSystem { value: String },
    UnknownCode { system: CodeSystemKind, code: String },
    /// The catalog maps the NAMASTE code to a different counterpart
    MappingMismatch {
        system: CodeSystemKind,
        code: String,
        expected: String,
    },
}

/// A problem found on the Condition at 0-based Bundle entry `entry`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodingIssue {
    pub entry: usize,
    #[serde(flatten)]
    pub kind: CodingIssueKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    pub status: IngestStatus,
    pub message: String,
    /// Condition entries read from the Bundle
    pub processed_entries: usize,
    pub issues: Vec<CodingIssue>,
}

pub fn ingest_bundle(catalog: &Catalog, bundle: &Bundle) -> Result<IngestReport> {
    if !ACCEPTED_BUNDLE_TYPES.contains(&bundle.bundle_type) {
        return Err(Error::UnsupportedBundleType(
            bundle.bundle_type.as_str().to_string(),
        ));
    }

    let mut processed_entries = 0;
    let mut issues = Vec::new();
    for (entry, resource) in bundle
        .entries()
        .iter()
        .enumerate()
        .filter_map(|(i, e)| e.resource.as_ref().map(|r| (i, r)))
    {
        if let Some(condition) = resource.as_condition() {
            processed_entries += 1;
            issues.extend(
                check_condition(catalog, condition)
                    .into_iter()
                    .map(|kind| CodingIssue { entry, kind }),
            );
        }
    }

    tracing::info!(
        bundle_type = bundle.bundle_type.as_str(),
        conditions = processed_entries,
        issues = issues.len(),
        "Encounter bundle ingested"
    );

    let (status, message) = if issues.is_empty() {
        (IngestStatus::Success, "Bundle ingested successfully".to_string())
    } else {
        (
            IngestStatus::Warning,
            format!("Bundle ingested with {} coding issue(s)", issues.len()),
        )
    };

    Ok(IngestReport {
        status,
        message,
        processed_entries,
        issues,
    })
}

fn check_condition(catalog: &Catalog, condition: &Condition) -> Vec<CodingIssueKind> {
    let codings = condition
        .code
        .as_ref()
        .map(|c| c.coding.as_slice())
        .unwrap_or_default();
    if codings.is_empty() {
        return vec![CodingIssueKind::NoCoding];
    }

    let mut issues = Vec::new();
    let mut recognised = Vec::with_capacity(codings.len());
    for coding in codings {
        let value = coding.system.as_deref().unwrap_or_default();
        match value.parse::<CodeSystemKind>() {
            Ok(system) => recognised.push((system, code_of(coding))),
            Err(_) => issues.push(CodingIssueKind::UnknownSystem {
                value: value.to_string(),
            }),
        }
    }

    let has = |wanted: &[CodeSystemKind]| recognised.iter().any(|(s, _)| wanted.contains(s));
    if !has(&[CodeSystemKind::Namaste])
        || !has(&[CodeSystemKind::Tm2, CodeSystemKind::Biomedicine])
    {
        issues.push(CodingIssueKind::MissingDualCoding);
    }

    let namaste_entries: Vec<_> = recognised
        .iter()
        .filter(|(s, _)| *s == CodeSystemKind::Namaste)
        .filter_map(|(_, code)| catalog.find_entry(CodeSystemKind::Namaste, code))
        .collect();

    for &(system, code) in &recognised {
        if catalog.find_entry(system, code).is_none() {
            issues.push(CodingIssueKind::UnknownCode {
                system,
                code: code.to_string(),
            });
            continue;
        }
        if system == CodeSystemKind::Namaste {
            continue;
        }
        let expected = namaste_entries
            .iter()
            .filter_map(|entry| entry.code_in(system))
            .find(|expected| *expected != code);
        if let Some(expected) = expected {
            issues.push(CodingIssueKind::MappingMismatch {
                system,
                code: code.to_string(),
                expected: expected.to_string(),
            });
        }
    }

    issues
}

fn code_of(coding: &Coding) -> &str {
    coding.code.as_deref().unwrap_or_default()
}
