//! Immutable hierarchical code catalog

use crate::error::{Result, ValidationError};
use crate::model::{CodeEntry, CodeGroup, CodeSystemKind};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    Catalog::from_json(include_str!("../data/catalog.json"))
        .expect("failed to load embedded data/catalog.json")
});

/// Code groups in insertion order. Never mutated after [`Catalog::load`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    groups: Vec<CodeGroup>,
}

impl Catalog {
    /// Validate and index `groups`.
    ///
    /// Rejects a group with an empty name, any entry with an empty code, and
    /// codes repeated within one group. Blank-only strings count as empty.
    pub fn load(groups: Vec<CodeGroup>) -> std::result::Result<Self, ValidationError> {
        for (index, group) in groups.iter().enumerate() {
            if group.name.trim().is_empty() {
                return Err(ValidationError::EmptyGroupName { index });
            }

            let mut seen = HashSet::new();
            for (position, entry) in group.entries().enumerate() {
                if entry.code.trim().is_empty() {
                    let entry = match position {
                        0 => "parent".to_string(),
                        n => format!("child #{n}"),
                    };
                    return Err(ValidationError::EmptyCode {
                        group: group.name.clone(),
                        entry,
                    });
                }
                if !seen.insert(entry.code.as_str()) {
                    return Err(ValidationError::DuplicateCode {
                        group: group.name.clone(),
                        code: entry.code.clone(),
                    });
                }
            }
        }

        tracing::debug!(groups = groups.len(), "Catalog loaded");
        Ok(Self { groups })
    }

    /// Load from a JSON array of code groups
    pub fn from_json(json: &str) -> Result<Self> {
        let groups: Vec<CodeGroup> = serde_json::from_str(json)?;
        Ok(Self::load(groups)?)
    }

    /// Load from a JSON fixture file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), groups = catalog.len(), "Catalog read from file");
        Ok(catalog)
    }

    /// The demonstration hierarchy bundled with the crate
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[CodeGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group by its parent code, falling back to a case-insensitive name match
    pub fn group(&self, id: &str) -> Option<&CodeGroup> {
        self.groups
            .iter()
            .find(|g| g.parent.code == id)
            .or_else(|| self.groups.iter().find(|g| g.name.eq_ignore_ascii_case(id)))
    }

    /// Every parent and child, in catalog order
    pub fn entries(&self) -> impl Iterator<Item = &CodeEntry> {
        self.groups.iter().flat_map(CodeGroup::entries)
    }

    /// First entry carrying `code` in `system`
    pub fn find_entry(&self, system: CodeSystemKind, code: &str) -> Option<&CodeEntry> {
        self.entries().find(|e| e.code_in(system) == Some(code))
    }
}
