//! Code translation between NAMASTE and the TM2 / biomedicine code sets

use crate::catalog::Catalog;
use crate::model::CodeSystemKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    NamasteToTm2,
    NamasteToBms,
    Tm2ToNamaste,
    BmsToNamaste,
}

impl Direction {
    /// (source system, target system)
    pub fn systems(&self) -> (CodeSystemKind, CodeSystemKind) {
        match self {
            Direction::NamasteToTm2 => (CodeSystemKind::Namaste, CodeSystemKind::Tm2),
            Direction::NamasteToBms => (CodeSystemKind::Namaste, CodeSystemKind::Biomedicine),
            Direction::Tm2ToNamaste => (CodeSystemKind::Tm2, CodeSystemKind::Namaste),
            Direction::BmsToNamaste => (CodeSystemKind::Biomedicine, CodeSystemKind::Namaste),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub source_code: String,
    pub translated_code: String,
    pub display: String,
    pub direction: Direction,
}

/// Translate `source_code` using the first catalog entry that carries it in
/// the source system and also has a code in the target system.
pub fn translate(
    catalog: &Catalog,
    source_code: &str,
    direction: Direction,
) -> Option<Translation> {
    let (source, target) = direction.systems();

    catalog
        .entries()
        .filter(|e| e.code_in(source) == Some(source_code))
        .find_map(|entry| {
            let translated = entry.code_in(target).filter(|c| !c.is_empty())?;
            Some(Translation {
                source_code: source_code.to_string(),
                translated_code: translated.to_string(),
                display: entry.name.clone(),
                direction,
            })
        })
}
