//! CodeSystem model

use super::complex::*;
use super::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A CodeSystem as the engine emits it: flat per-row exports or the
/// hierarchical catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CodeSystem {
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Computer-friendly name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub status: PublicationStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// If code comparison is case sensitive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,

    /// Hierarchy meaning (grouped-by | is-a | part-of | classified-with)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hierarchy_meaning: Option<String>,

    /// Content type (not-present | example | fragment | complete | supplement)
    pub content: CodeSystemContentMode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept: Option<Vec<CodeSystemConcept>>,

    /// Unmodelled fields, kept through a round trip
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "CodeSystem".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodeSystemContentMode {
    NotPresent,
    Example,
    Fragment,
    Complete,
    Supplement,
}

/// A concept, optionally with nested child concepts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CodeSystemConcept {
    pub code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,

    /// Children under `is-a` hierarchies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept: Option<Vec<CodeSystemConcept>>,
}

impl CodeSystemConcept {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display: None,
            definition: None,
            concept: None,
        }
    }

    /// Number of concepts in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        1 + self
            .concept
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(CodeSystemConcept::subtree_len)
            .sum::<usize>()
    }
}

impl CodeSystem {
    pub fn new(status: PublicationStatus, content: CodeSystemContentMode) -> Self {
        Self {
            resource_type: "CodeSystem".to_string(),
            id: None,
            url: None,
            version: None,
            name: None,
            title: None,
            status,
            description: None,
            case_sensitive: None,
            hierarchy_meaning: None,
            content,
            count: None,
            concept: None,
            extensions: HashMap::new(),
        }
    }

    /// Deserialize, rejecting documents of another `resourceType`
    pub fn from_value(value: &Value) -> Result<Self> {
        let cs: Self = serde_json::from_value(value.clone())?;
        if cs.resource_type != "CodeSystem" {
            return Err(Error::UnexpectedResourceType {
                expected: "CodeSystem".to_string(),
                actual: cs.resource_type,
            });
        }
        Ok(cs)
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Error::from)
    }

    pub fn concepts(&self) -> &[CodeSystemConcept] {
        self.concept.as_deref().unwrap_or(&[])
    }

    /// Total number of concepts, counting nested children
    pub fn total_concepts(&self) -> usize {
        self.concepts()
            .iter()
            .map(CodeSystemConcept::subtree_len)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_minimal_code_system() {
        let mut cs = CodeSystem::new(PublicationStatus::Active, CodeSystemContentMode::Complete);
        cs.concept = Some(Vec::new());

        let json = serde_json::to_value(&cs).unwrap();
        assert_eq!(
            json,
            json!({
                "resourceType": "CodeSystem",
                "status": "active",
                "content": "complete",
                "concept": []
            })
        );
    }

    #[test]
    fn test_nested_concepts_are_counted() {
        let cs = CodeSystem::from_value(&json!({
            "resourceType": "CodeSystem",
            "status": "active",
            "content": "complete",
            "concept": [
                {
                    "code": "C000",
                    "display": "Metabolic Disorders",
                    "concept": [
                        { "code": "C001", "display": "Diabetes" },
                        { "code": "C002", "display": "Hypertension" }
                    ]
                }
            ]
        }))
        .unwrap();

        assert_eq!(cs.concepts().len(), 1);
        assert_eq!(cs.total_concepts(), 3);
    }

    #[test]
    fn test_from_value_rejects_other_resource_types() {
        let err = CodeSystem::from_value(&json!({
            "resourceType": "ValueSet",
            "status": "active",
            "content": "complete"
        }))
        .unwrap_err();

        assert!(matches!(err, Error::UnexpectedResourceType { .. }));
    }

    #[test]
    fn test_unknown_fields_land_in_extensions() {
        let cs = CodeSystem::from_value(&json!({
            "resourceType": "CodeSystem",
            "status": "draft",
            "content": "fragment",
            "publisher": "Ministry of AYUSH"
        }))
        .unwrap();

        assert_eq!(cs.extensions.get("publisher"), Some(&json!("Ministry of AYUSH")));
    }
}
