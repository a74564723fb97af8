//! FHIR ConceptMap model
//!
//! Minimal version-agnostic model for ConceptMaps: groups of source codes, each
//! mapped to target codes in another system.

use super::complex::*;
use super::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// FHIR ConceptMap resource
///
/// A statement of relationships from one set of codes to one or more others.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConceptMap {
    /// Resource type - always "ConceptMap"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Logical id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Canonical identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Name (computer friendly)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Publication status
    pub status: PublicationStatus,

    /// Same source and target systems
    #[serde(default)]
    pub group: Vec<ConceptMapGroup>,

    /// Additional content
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "ConceptMap".to_string()
}

/// Mappings sharing one source and one target system
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConceptMapGroup {
    /// Source system
    pub source: String,

    /// Target system
    pub target: String,

    /// Mappings for a concept from the source set
    #[serde(default)]
    pub element: Vec<ConceptMapElement>,
}

/// A source code and the codes it maps to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConceptMapElement {
    /// Identifies element being mapped
    pub code: String,

    /// Concepts in the target system
    #[serde(default)]
    pub target: Vec<ConceptMapTarget>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConceptMapTarget {
    /// Code that identifies the target element
    pub code: String,
}

impl ConceptMap {
    pub fn new(status: PublicationStatus) -> Self {
        Self {
            resource_type: "ConceptMap".to_string(),
            id: None,
            url: None,
            name: None,
            status,
            group: Vec::new(),
            extensions: HashMap::new(),
        }
    }

    /// Parse from JSON Value
    pub fn from_value(value: &Value) -> Result<Self> {
        let map: Self = serde_json::from_value(value.clone())?;
        if map.resource_type != "ConceptMap" {
            return Err(Error::UnexpectedResourceType {
                expected: "ConceptMap".to_string(),
                actual: map.resource_type,
            });
        }
        Ok(map)
    }

    /// Convert to JSON Value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Error::from)
    }

    /// Find the group mapping `source` to `target`
    pub fn group_for(&self, source: &str, target: &str) -> Option<&ConceptMapGroup> {
        self.group
            .iter()
            .find(|g| g.source == source && g.target == target)
    }
}

impl ConceptMapGroup {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            element: Vec::new(),
        }
    }

    /// Targets recorded for `code`, in element order
    pub fn targets_of<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.element
            .iter()
            .filter(move |e| e.code == code)
            .flat_map(|e| e.target.iter().map(|t| t.code.as_str()))
    }
}

impl ConceptMapElement {
    /// Element with a single target code
    pub fn one_to_one(code: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            target: vec![ConceptMapTarget {
                code: target.into(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_concept_map() {
        let mut map = ConceptMap::new(PublicationStatus::Active);
        let mut group = ConceptMapGroup::new("NAMASTE", "TM2");
        group
            .element
            .push(ConceptMapElement::one_to_one("C001", "TM2-1001"));
        map.group.push(group);

        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(
            json,
            json!({
                "resourceType": "ConceptMap",
                "status": "active",
                "group": [{
                    "source": "NAMASTE",
                    "target": "TM2",
                    "element": [{ "code": "C001", "target": [{ "code": "TM2-1001" }] }]
                }]
            })
        );
    }

    #[test]
    fn test_group_lookup() {
        let map = ConceptMap::from_value(&json!({
            "resourceType": "ConceptMap",
            "status": "active",
            "group": [
                { "source": "NAMASTE", "target": "TM2",
                  "element": [{ "code": "C001", "target": [{ "code": "TM2-1001" }] }] },
                { "source": "NAMASTE", "target": "BMS",
                  "element": [{ "code": "C001", "target": [{ "code": "ICD-11-5A11" }] }] }
            ]
        }))
        .unwrap();

        let bms = map.group_for("NAMASTE", "BMS").unwrap();
        assert_eq!(bms.targets_of("C001").collect::<Vec<_>>(), vec!["ICD-11-5A11"]);
        assert!(map.group_for("TM2", "NAMASTE").is_none());
    }
}
