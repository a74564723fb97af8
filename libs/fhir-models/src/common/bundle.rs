//! Bundle: the container the engine assembles problem lists into

use super::error::{Error, Result};
use super::resource::Resource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    #[serde(default = "bundle_resource_type")]
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type")]
    pub bundle_type: BundleType,

    /// `None` omits the field; `Some(vec![])` serializes as `"entry": []`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<Vec<BundleEntry>>,

    /// Fields not modelled here (`timestamp`, `total`, `link`, ...)
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn bundle_resource_type() -> String {
    "Bundle".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BundleType {
    Document,
    Message,
    Transaction,
    TransactionResponse,
    Batch,
    BatchResponse,
    History,
    Searchset,
    Collection,
}

impl BundleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BundleType::Document => "document",
            BundleType::Message => "message",
            BundleType::Transaction => "transaction",
            BundleType::TransactionResponse => "transaction-response",
            BundleType::Batch => "batch",
            BundleType::BatchResponse => "batch-response",
            BundleType::History => "history",
            BundleType::Searchset => "searchset",
            BundleType::Collection => "collection",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Resource>,

    /// How a transaction or batch entry is to be processed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<BundleEntryRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleEntryRequest {
    /// GET | HEAD | POST | PUT | DELETE | PATCH
    pub method: String,
    pub url: String,
}

impl BundleEntry {
    pub fn with_resource(resource: Resource) -> Self {
        Self {
            full_url: None,
            resource: Some(resource),
            request: None,
        }
    }
}

impl Bundle {
    pub fn new(bundle_type: BundleType) -> Self {
        Self {
            resource_type: bundle_resource_type(),
            id: None,
            bundle_type,
            entry: None,
            extensions: HashMap::new(),
        }
    }

    /// Deserialize, rejecting documents of another `resourceType`
    pub fn from_value(value: &Value) -> Result<Self> {
        let bundle = Self::deserialize(value)?;
        if bundle.resource_type != "Bundle" {
            return Err(Error::UnexpectedResourceType {
                expected: "Bundle".to_string(),
                actual: bundle.resource_type,
            });
        }
        Ok(bundle)
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Error::from)
    }

    pub fn is_collection(&self) -> bool {
        self.bundle_type == BundleType::Collection
    }

    pub fn entry_count(&self) -> usize {
        self.entries().len()
    }

    pub fn entries(&self) -> &[BundleEntry] {
        self.entry.as_deref().unwrap_or_default()
    }

    /// Entry resources in entry order, skipping resource-less entries
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.entries().iter().filter_map(|e| e.resource.as_ref())
    }

    /// Append an entry, creating the entry list on first use
    pub fn add_entry(&mut self, entry: BundleEntry) {
        self.entry.get_or_insert_with(Vec::new).push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Condition, Patient};
    use serde_json::json;

    #[test]
    fn parses_collection_with_patient() {
        let json = json!({
            "resourceType": "Bundle",
            "id": "example-bundle",
            "type": "collection",
            "entry": [
                {
                    "fullUrl": "urn:uuid:patient-1",
                    "resource": {
                        "resourceType": "Patient",
                        "id": "patient-1"
                    }
                }
            ]
        });

        let bundle: Bundle = serde_json::from_value(json).unwrap();
        assert_eq!(bundle.id, Some("example-bundle".to_string()));
        assert_eq!(bundle.bundle_type, BundleType::Collection);
        assert_eq!(bundle.entry_count(), 1);
        assert_eq!(bundle.entries()[0].resource.as_ref().unwrap().id(), Some("patient-1"));
    }

    #[test]
    fn empty_collection_keeps_entry_array() {
        let mut bundle = Bundle::new(BundleType::Collection);
        bundle.entry = Some(Vec::new());

        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(
            json,
            json!({ "resourceType": "Bundle", "type": "collection", "entry": [] })
        );
    }

    #[test]
    fn from_value_rejects_other_resource_types() {
        let err = Bundle::from_value(&json!({ "resourceType": "Patient", "type": "collection" }))
            .unwrap_err();
        assert!(matches!(err, Error::UnexpectedResourceType { .. }));
    }

    #[test]
    fn transaction_entries_keep_their_request() {
        let bundle = Bundle::from_value(&json!({
            "resourceType": "Bundle",
            "type": "transaction",
            "entry": [{
                "resource": { "resourceType": "Encounter", "status": "finished" },
                "request": { "method": "POST", "url": "Encounter" }
            }]
        }))
        .unwrap();

        assert_eq!(bundle.bundle_type.as_str(), "transaction");
        let entry = &bundle.entries()[0];
        assert_eq!(entry.resource, Some(Resource::Unmodelled));
        assert_eq!(entry.request.as_ref().map(|r| r.url.as_str()), Some("Encounter"));
    }

    #[test]
    fn collection_detection() {
        assert!(Bundle::new(BundleType::Collection).is_collection());
        assert!(!Bundle::new(BundleType::Transaction).is_collection());
    }

    #[test]
    fn add_entry_preserves_order() {
        let mut bundle = Bundle::new(BundleType::Collection);
        bundle.add_entry(BundleEntry::with_resource(Resource::Patient(Patient {
            id: Some("p1".to_string()),
            ..Default::default()
        })));
        bundle.add_entry(BundleEntry::with_resource(Resource::Condition(Condition {
            id: Some("condition-1".to_string()),
            ..Default::default()
        })));

        let types: Vec<_> = bundle.resources().map(Resource::resource_type).collect();
        assert_eq!(types, vec!["Patient", "Condition"]);
    }
}
