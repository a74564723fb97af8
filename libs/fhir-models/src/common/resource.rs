//! Clinical resources carried inside generated Bundles

use super::complex::*;
use serde::{Deserialize, Deserializer, Serialize};

/// A resource that can appear in a Bundle entry, tagged by `resourceType`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resourceType")]
pub enum Resource {
    Patient(Patient),
    Condition(Condition),
    /// Any other resource type found in an incoming Bundle. Its content is
    /// dropped and it cannot be serialized.
    #[serde(other, skip_serializing)]
    Unmodelled,
}

impl Resource {
    pub fn resource_type(&self) -> &'static str {
        match self {
            Resource::Patient(_) => "Patient",
            Resource::Condition(_) => "Condition",
            Resource::Unmodelled => "Resource",
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Resource::Patient(p) => p.id.as_deref(),
            Resource::Condition(c) => c.id.as_deref(),
            Resource::Unmodelled => None,
        }
    }

    pub fn as_condition(&self) -> Option<&Condition> {
        match self {
            Resource::Condition(c) => Some(c),
            _ => None,
        }
    }
}

/// FHIR Patient resource (demographics only)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// A name associated with the patient
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanName>,

    /// male | female | other | unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

/// FHIR Condition resource
///
/// A problem-list entry coded in one terminology system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Identification of the condition, problem or diagnosis.
    ///
    /// A list of concepts is also accepted on input (one concept per coding
    /// system) and merged into a single concept.
    #[serde(
        default,
        deserialize_with = "concept_or_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub code: Option<CodeableConcept>,

    /// Who has the condition; absent when the subject is unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConceptOrList {
    List(Vec<CodeableConcept>),
    One(CodeableConcept),
}

fn concept_or_list<'de, D>(deserializer: D) -> Result<Option<CodeableConcept>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ConceptOrList>::deserialize(deserializer)? {
        None => None,
        Some(ConceptOrList::One(concept)) => Some(concept),
        Some(ConceptOrList::List(concepts)) => {
            let mut merged = CodeableConcept::default();
            for concept in concepts {
                merged.coding.extend(concept.coding);
                if merged.text.is_none() {
                    merged.text = concept.text;
                }
            }
            Some(merged)
        }
    })
}
