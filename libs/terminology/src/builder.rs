//! FHIR resource generation
//!
//! Every builder is a total, deterministic function of its arguments: no
//! clocks, counters or random ids. Malformed input is carried through as
//! blank fields rather than rejected.

use crate::catalog::Catalog;
use crate::model::{CodeEntry, CodeSystemKind, Subject, TabularRow};
use ayush_models::common::{
    Bundle, BundleEntry, BundleType, CodeSystem, CodeSystemConcept, CodeSystemContentMode,
    CodeableConcept, Coding, Condition, ConceptMap, ConceptMapElement, ConceptMapGroup,
    HumanName, Patient, PublicationStatus, Reference, Resource,
};
use serde::{Deserialize, Serialize};

/// Source system of every generated ConceptMap group
pub const MAP_SOURCE: &str = "NAMASTE";
/// Target of the first ConceptMap group
pub const MAP_TARGET_TM2: &str = "TM2";
/// Target of the second ConceptMap group
pub const MAP_TARGET_BMS: &str = "BMS";

/// Identity stamped on generated terminology resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderOptions {
    pub code_system_id: Option<String>,
    pub code_system_url: Option<String>,
    pub concept_map_id: Option<String>,
    pub concept_map_url: Option<String>,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            code_system_id: Some("namaste".to_string()),
            code_system_url: None,
            concept_map_id: Some("namaste-conceptmap".to_string()),
            concept_map_url: None,
        }
    }
}

/// One concept per row, in row order, without filtering
pub fn build_code_system(rows: &[TabularRow], options: &BuilderOptions) -> CodeSystem {
    let mut cs = CodeSystem::new(PublicationStatus::Active, CodeSystemContentMode::Complete);
    cs.id = options.code_system_id.clone();
    cs.url = options.code_system_url.clone();
    cs.concept = Some(
        rows.iter()
            .map(|row| CodeSystemConcept {
                display: Some(row.name.clone()),
                definition: Some(row.meaning.clone()),
                ..CodeSystemConcept::new(row.code.clone())
            })
            .collect(),
    );
    cs
}

/// Two groups, NAMASTE→TM2 then NAMASTE→BMS, each with one element per row.
///
/// An absent target is emitted as an empty code.
pub fn build_concept_map(rows: &[TabularRow], options: &BuilderOptions) -> ConceptMap {
    let group = |target: &str, pick: fn(&TabularRow) -> Option<&String>| ConceptMapGroup {
        element: rows
            .iter()
            .map(|row| {
                ConceptMapElement::one_to_one(
                    row.code.clone(),
                    pick(row).cloned().unwrap_or_default(),
                )
            })
            .collect(),
        ..ConceptMapGroup::new(MAP_SOURCE, target)
    };

    let mut map = ConceptMap::new(PublicationStatus::Active);
    map.id = options.concept_map_id.clone();
    map.url = options.concept_map_url.clone();
    map.group = vec![
        group(MAP_TARGET_TM2, |row| row.tm2.as_ref()),
        group(MAP_TARGET_BMS, |row| row.bms.as_ref()),
    ];
    map
}

/// A collection Bundle: the subject's Patient first, then one Condition per
/// problem-list entry in order.
pub fn build_bundle(subject: Option<&Subject>, problem_list: &[CodeEntry]) -> Bundle {
    let mut bundle = Bundle::new(BundleType::Collection);
    bundle.entry = Some(Vec::with_capacity(
        problem_list.len() + usize::from(subject.is_some()),
    ));

    if let Some(subject) = subject {
        bundle.add_entry(BundleEntry::with_resource(Resource::Patient(Patient {
            id: Some(subject.id.clone()),
            name: subject
                .name
                .iter()
                .map(|text| HumanName {
                    text: Some(text.clone()),
                })
                .collect(),
            gender: subject.gender.clone(),
        })));
    }

    for (index, entry) in problem_list.iter().enumerate() {
        bundle.add_entry(BundleEntry::with_resource(Resource::Condition(Condition {
            id: Some(format!("condition-{}", index + 1)),
            code: Some(CodeableConcept {
                coding: vec![Coding::new(
                    entry.system.as_str(),
                    entry.code.clone(),
                    entry.name.clone(),
                )],
                text: Some(entry.meaning.clone()),
            }),
            subject: subject.map(|s| Reference::to("Patient", &s.id)),
        })));
    }

    bundle
}

/// The catalog itself as a hierarchical (`is-a`) CodeSystem: each group's
/// parent concept with its children nested beneath it.
pub fn build_catalog_code_system(
    catalog: &Catalog,
    options: &BuilderOptions,
    version: Option<&str>,
) -> CodeSystem {
    fn concept(entry: &CodeEntry) -> CodeSystemConcept {
        CodeSystemConcept {
            display: Some(entry.name.clone()),
            definition: Some(entry.meaning.clone()),
            ..CodeSystemConcept::new(entry.code.clone())
        }
    }

    let mut cs = CodeSystem::new(PublicationStatus::Active, CodeSystemContentMode::Complete);
    cs.id = options.code_system_id.clone();
    cs.url = options.code_system_url.clone();
    cs.version = version.map(str::to_string);
    cs.name = Some(CodeSystemKind::Namaste.as_str().to_string());
    cs.title = Some("NAMASTE traditional medicine codes".to_string());
    cs.case_sensitive = Some(true);
    cs.hierarchy_meaning = Some("is-a".to_string());
    cs.concept = Some(
        catalog
            .groups()
            .iter()
            .map(|group| {
                let children: Vec<_> = group.children.iter().map(concept).collect();
                CodeSystemConcept {
                    concept: (!children.is_empty()).then_some(children),
                    ..concept(&group.parent)
                }
            })
            .collect(),
    );
    cs.count = u32::try_from(cs.total_concepts()).ok();
    cs
}
