//! Synthetic cross-system identifiers for unmapped rows

use crate::model::TabularRow;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Base offset of generated TM2 codes (`TM2-<offset + n>`)
pub const TM2_OFFSET: u64 = 1000;

/// Base offset of generated biomedicine codes (`BMS-<offset + n>`)
pub const BMS_OFFSET: u64 = 2000;

// Slot range for content-addressed ids.
const CONTENT_SLOTS: u64 = 1_000_000;

/// How the `n` in a generated `TM2-<n>` / `BMS-<n>` is chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyntheticIds {
    /// `offset + position + 1`, position being the 0-based row index.
    /// Reordering or filtering rows changes the generated ids.
    #[default]
    Positional,
    /// `offset + slot`, slot derived from a SHA-256 digest of the row's code.
    /// Identical codes receive identical ids wherever they appear.
    ContentAddressed,
}

impl SyntheticIds {
    fn slot(&self, index: usize, row: &TabularRow) -> u64 {
        match self {
            SyntheticIds::Positional => index as u64 + 1,
            SyntheticIds::ContentAddressed => {
                let digest = Sha256::digest(row.code.as_bytes());
                let mut prefix = [0u8; 8];
                prefix.copy_from_slice(&digest[..8]);
                u64::from_be_bytes(prefix) % CONTENT_SLOTS + 1
            }
        }
    }
}

/// Fill absent or empty `TM2`/`BMS` fields using positional ids
pub fn fill_mappings(rows: &[TabularRow]) -> Vec<TabularRow> {
    fill_mappings_with(rows, SyntheticIds::Positional)
}

/// Fill absent or empty `TM2`/`BMS` fields.
///
/// Returns new rows in input order. Non-empty values are kept as they are and
/// rows are otherwise passed through untouched, blank codes included.
pub fn fill_mappings_with(rows: &[TabularRow], strategy: SyntheticIds) -> Vec<TabularRow> {
    let mut filled = 0usize;

    let mapped = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let mut row = row.clone();
            if !row.has_tm2() || !row.has_bms() {
                let slot = strategy.slot(index, &row);
                if !row.has_tm2() {
                    row.tm2 = Some(format!("TM2-{}", TM2_OFFSET + slot));
                    filled += 1;
                }
                if !row.has_bms() {
                    row.bms = Some(format!("BMS-{}", BMS_OFFSET + slot));
                    filled += 1;
                }
            }
            row
        })
        .collect();

    tracing::trace!(rows = rows.len(), filled, ?strategy, "Mappings filled");
    mapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_ids_follow_row_index() {
        let rows = fill_mappings(&[TabularRow::new("C1"), TabularRow::new("C2")]);

        assert_eq!(rows[0].tm2.as_deref(), Some("TM2-1001"));
        assert_eq!(rows[1].tm2.as_deref(), Some("TM2-1002"));
        assert_eq!(rows[0].bms.as_deref(), Some("BMS-2001"));
        assert_eq!(rows[1].bms.as_deref(), Some("BMS-2002"));
    }

    #[test]
    fn populated_rows_are_unchanged() {
        let row = TabularRow {
            name: "Diabetes".to_string(),
            tm2: Some("TM2-1001".to_string()),
            bms: Some("ICD-11-5A11".to_string()),
            ..TabularRow::new("C001")
        };
        assert_eq!(fill_mappings(std::slice::from_ref(&row)), vec![row]);
    }

    #[test]
    fn only_missing_side_is_filled() {
        let rows = [
            TabularRow {
                tm2: Some("TM2-7".to_string()),
                bms: Some(String::new()),
                ..TabularRow::new("A")
            },
            TabularRow::new("B"),
            TabularRow {
                bms: Some("ICD-11-X".to_string()),
                ..TabularRow::new("C")
            },
        ];
        let filled = fill_mappings(&rows);

        assert_eq!(filled[0].tm2.as_deref(), Some("TM2-7"));
        assert_eq!(filled[0].bms.as_deref(), Some("BMS-2001"));
        assert_eq!(filled[2].tm2.as_deref(), Some("TM2-1003"));
        assert_eq!(filled[2].bms.as_deref(), Some("ICD-11-X"));
    }

    #[test]
    fn duplicates_and_blank_codes_pass_through() {
        let rows = fill_mappings(&[
            TabularRow::new("C1"),
            TabularRow::new("C1"),
            TabularRow::default(),
        ]);

        assert_eq!(rows.len(), 3);
        assert_ne!(rows[0].tm2, rows[1].tm2);
        assert_eq!(rows[2].code, "");
        assert_eq!(rows[2].tm2.as_deref(), Some("TM2-1003"));
    }

    #[test]
    fn content_addressed_ids_ignore_position() {
        let forward = fill_mappings_with(
            &[TabularRow::new("C1"), TabularRow::new("C2")],
            SyntheticIds::ContentAddressed,
        );
        let reversed = fill_mappings_with(
            &[TabularRow::new("C2"), TabularRow::new("C1")],
            SyntheticIds::ContentAddressed,
        );

        assert_eq!(forward[0], reversed[1]);
        assert_eq!(forward[1], reversed[0]);
        assert!(forward[0].tm2.as_deref().unwrap().starts_with("TM2-"));
        assert!(forward[0].bms.as_deref().unwrap().starts_with("BMS-"));
    }

    #[test]
    fn strategy_uses_kebab_case_names() {
        let strategy: SyntheticIds = serde_json::from_str("\"content-addressed\"").unwrap();
        assert_eq!(strategy, SyntheticIds::ContentAddressed);
    }
}
