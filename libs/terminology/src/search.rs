//! Free-text search over the catalog
//!
//! Matching is a case-insensitive substring test against display names.
//! Results keep catalog insertion order; there is no relevance ranking.

use crate::catalog::Catalog;
use crate::model::{CodeGroup, CodeSystemKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Groups whose own name, or any child's name, contains `term`.
///
/// An empty `term` yields no groups.
pub fn search<'a>(catalog: &'a Catalog, term: &str) -> Vec<&'a CodeGroup> {
    if term.is_empty() {
        return Vec::new();
    }
    let needle = term.to_lowercase();

    catalog
        .groups()
        .iter()
        .filter(|group| {
            contains(&group.name, &needle)
                || group.children.iter().any(|c| contains(&c.name, &needle))
        })
        .collect()
}

fn contains(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupOptions {
    /// Maximum number of suggestions
    #[serde(default)]
    pub limit: Option<usize>,

    /// Only suggest codes from this system
    #[serde(default)]
    pub system: Option<CodeSystemKind>,
}

/// Auto-complete suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub code: String,
    pub display: String,
    pub system: CodeSystemKind,
}

/// Flattened auto-complete over every parent and child entry.
///
/// Each entry whose name contains `term` contributes its own code followed by
/// its TM2 and biomedicine counterparts. A `(system, code)` pair is suggested
/// once, at its first position in catalog order.
pub fn lookup(catalog: &Catalog, term: &str, options: &LookupOptions) -> Vec<Suggestion> {
    if term.is_empty() || options.limit == Some(0) {
        return Vec::new();
    }
    let needle = term.to_lowercase();
    let limit = options.limit.unwrap_or(usize::MAX);

    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();

    for entry in catalog.entries().filter(|e| contains(&e.name, &needle)) {
        let candidates = [
            (entry.system, Some(entry.code.as_str())),
            (CodeSystemKind::Tm2, entry.tm2_code.as_deref()),
            (CodeSystemKind::Biomedicine, entry.biomedicine_code.as_deref()),
        ];

        for (system, code) in candidates {
            let Some(code) = code.filter(|c| !c.is_empty()) else {
                continue;
            };
            if options.system.is_some_and(|wanted| wanted != system) {
                continue;
            }
            if !seen.insert((system, code)) {
                continue;
            }
            suggestions.push(Suggestion {
                code: code.to_string(),
                display: entry.name.clone(),
                system,
            });
            if suggestions.len() == limit {
                return suggestions;
            }
        }
    }

    suggestions
}
