//! Code entries, groups and imported rows

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Vocabulary a code belongs to
///
/// Deserializes through [`FromStr`], so every accepted spelling normalizes to
/// the canonical name on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum CodeSystemKind {
    #[serde(rename = "NAMASTE")]
    Namaste,
    #[serde(rename = "TM2")]
    Tm2,
    #[serde(rename = "Biomedicine")]
    Biomedicine,
}

impl CodeSystemKind {
    pub const ALL: [CodeSystemKind; 3] = [
        CodeSystemKind::Namaste,
        CodeSystemKind::Tm2,
        CodeSystemKind::Biomedicine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CodeSystemKind::Namaste => "NAMASTE",
            CodeSystemKind::Tm2 => "TM2",
            CodeSystemKind::Biomedicine => "Biomedicine",
        }
    }
}

impl fmt::Display for CodeSystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown code system: '{0}'")]
pub struct UnknownSystem(pub String);

impl FromStr for CodeSystemKind {
    type Err = UnknownSystem;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "namaste" => Ok(CodeSystemKind::Namaste),
            "tm2" | "icd-11 tm2" | "icd11-tm2" => Ok(CodeSystemKind::Tm2),
            "biomedicine" | "bms" => Ok(CodeSystemKind::Biomedicine),
            _ => Err(UnknownSystem(s.to_string())),
        }
    }
}

impl TryFrom<String> for CodeSystemKind {
    type Error = UnknownSystem;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One concept in one vocabulary, with its cross-system identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeEntry {
    pub code: String,

    pub name: String,

    /// Free-text definition
    #[serde(default)]
    pub meaning: String,

    pub system: CodeSystemKind,

    #[serde(default, alias = "tm2", skip_serializing_if = "Option::is_none")]
    pub tm2_code: Option<String>,

    #[serde(
        default,
        alias = "biomedicine",
        skip_serializing_if = "Option::is_none"
    )]
    pub biomedicine_code: Option<String>,
}

impl CodeEntry {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        meaning: impl Into<String>,
        system: CodeSystemKind,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            meaning: meaning.into(),
            system,
            tm2_code: None,
            biomedicine_code: None,
        }
    }

    pub fn with_tm2(mut self, code: impl Into<String>) -> Self {
        self.tm2_code = Some(code.into());
        self
    }

    pub fn with_biomedicine(mut self, code: impl Into<String>) -> Self {
        self.biomedicine_code = Some(code.into());
        self
    }

    /// The code this entry carries for `system`, if any
    pub fn code_in(&self, system: CodeSystemKind) -> Option<&str> {
        if self.system == system {
            return Some(&self.code);
        }
        match system {
            CodeSystemKind::Tm2 => self.tm2_code.as_deref(),
            CodeSystemKind::Biomedicine => self.biomedicine_code.as_deref(),
            CodeSystemKind::Namaste => None,
        }
    }
}

/// A supertype concept with its subtypes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeGroup {
    pub name: String,

    pub parent: CodeEntry,

    /// Insertion ordered; may be empty
    #[serde(default)]
    pub children: Vec<CodeEntry>,
}

impl CodeGroup {
    /// Parent first, then children in order
    pub fn entries(&self) -> impl Iterator<Item = &CodeEntry> {
        std::iter::once(&self.parent).chain(self.children.iter())
    }
}

/// One imported terminology record
///
/// Field names follow the import header `Code, Name, Meaning, System, TM2, BMS`.
/// Missing columns deserialize as blank fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularRow {
    #[serde(rename = "Code", default)]
    pub code: String,

    #[serde(rename = "Name", default)]
    pub name: String,

    #[serde(rename = "Meaning", default)]
    pub meaning: String,

    #[serde(rename = "System", default)]
    pub system: String,

    #[serde(rename = "TM2", default, skip_serializing_if = "Option::is_none")]
    pub tm2: Option<String>,

    #[serde(rename = "BMS", default, skip_serializing_if = "Option::is_none")]
    pub bms: Option<String>,
}

impl TabularRow {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Default::default()
        }
    }

    pub fn has_tm2(&self) -> bool {
        self.tm2.as_deref().is_some_and(|v| !v.is_empty())
    }

    pub fn has_bms(&self) -> bool {
        self.bms.as_deref().is_some_and(|v| !v.is_empty())
    }
}

impl From<&CodeEntry> for TabularRow {
    fn from(entry: &CodeEntry) -> Self {
        Self {
            code: entry.code.clone(),
            name: entry.name.clone(),
            meaning: entry.meaning.clone(),
            system: entry.system.as_str().to_string(),
            tm2: entry.tm2_code.clone(),
            bms: entry.biomedicine_code.clone(),
        }
    }
}

/// The patient a Bundle is generated for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl Subject {
    pub fn new(id: impl Into<String>, name: impl Into<String>, gender: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            gender: Some(gender.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn system_parses_aliases() {
        assert_eq!("NAMASTE".parse(), Ok(CodeSystemKind::Namaste));
        assert_eq!("ICD-11 TM2".parse(), Ok(CodeSystemKind::Tm2));
        assert_eq!("bms".parse(), Ok(CodeSystemKind::Biomedicine));
        assert!("SNOMED".parse::<CodeSystemKind>().is_err());
    }

    #[test]
    fn system_deserializes_like_from_str_and_serializes_canonically() {
        let kinds: Vec<CodeSystemKind> =
            serde_json::from_value(json!(["namaste", "ICD-11 TM2", "bms", " Biomedicine "]))
                .unwrap();
        assert_eq!(
            kinds,
            vec![
                CodeSystemKind::Namaste,
                CodeSystemKind::Tm2,
                CodeSystemKind::Biomedicine,
                CodeSystemKind::Biomedicine,
            ]
        );
        assert_eq!(
            serde_json::to_value(&kinds).unwrap(),
            json!(["NAMASTE", "TM2", "Biomedicine", "Biomedicine"])
        );

        let err = serde_json::from_value::<CodeSystemKind>(json!("SNOMED")).unwrap_err();
        assert!(err.to_string().contains("Unknown code system: 'SNOMED'"));
    }

    #[test]
    fn entry_accepts_fixture_field_spellings() {
        let entry: CodeEntry = serde_json::from_value(json!({
            "code": "C001",
            "name": "Diabetes",
            "meaning": "A chronic metabolic disorder affecting glucose metabolism.",
            "system": "NAMASTE",
            "tm2": "TM2-1001",
            "biomedicine": "ICD-11-5A11"
        }))
        .unwrap();

        assert_eq!(entry.tm2_code.as_deref(), Some("TM2-1001"));
        assert_eq!(entry.code_in(CodeSystemKind::Biomedicine), Some("ICD-11-5A11"));
        assert_eq!(entry.code_in(CodeSystemKind::Namaste), Some("C001"));
    }

    #[test]
    fn row_with_missing_columns_is_blank() {
        let row: TabularRow = serde_json::from_value(json!({ "Code": "C1" })).unwrap();
        assert_eq!(row, TabularRow::new("C1"));
        assert!(!row.has_tm2());
    }

    #[test]
    fn empty_cross_system_value_counts_as_missing() {
        let row = TabularRow {
            tm2: Some(String::new()),
            bms: Some("BMS-9".to_string()),
            ..TabularRow::new("C1")
        };
        assert!(!row.has_tm2());
        assert!(row.has_bms());
    }
}
