//! Tabular row import and advisory validation
//!
//! CSV input uses the header `Code, Name, Meaning, System, TM2, BMS`. Columns
//! may be missing or reordered; absent values become blank fields. Nothing
//! here rejects a row: [`validate_rows`] only reports what a caller may want to
//! warn about.

use crate::error::Result;
use crate::model::{CodeSystemKind, TabularRow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;

/// Read rows from CSV with a header line
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<TabularRow>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv.deserialize::<TabularRow>() {
        rows.push(record?);
    }

    tracing::debug!(rows = rows.len(), "CSV rows imported");
    Ok(rows)
}

pub fn parse_rows(csv_text: &str) -> Result<Vec<TabularRow>> {
    read_rows(csv_text.as_bytes())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RowIssueKind {
    EmptyCode,
    EmptyName,
    /// Same code as an earlier row
    #[serde(rename_all = "camelCase")]
    DuplicateCode { first_row: usize },
    UnknownSystem { value: String },
}

/// A problem found on the row at 0-based position `row`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowIssue {
    pub row: usize,
    #[serde(flatten)]
    pub kind: RowIssueKind,
}

pub fn validate_rows(rows: &[TabularRow]) -> Vec<RowIssue> {
    let mut issues = Vec::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    for (row, record) in rows.iter().enumerate() {
        let code = record.code.trim();
        if code.is_empty() {
            issues.push(RowIssue {
                row,
                kind: RowIssueKind::EmptyCode,
            });
        } else if let Some(&first_row) = first_seen.get(code) {
            issues.push(RowIssue {
                row,
                kind: RowIssueKind::DuplicateCode { first_row },
            });
        } else {
            first_seen.insert(code, row);
        }

        if record.name.trim().is_empty() {
            issues.push(RowIssue {
                row,
                kind: RowIssueKind::EmptyName,
            });
        }

        if record.system.parse::<CodeSystemKind>().is_err() {
            issues.push(RowIssue {
                row,
                kind: RowIssueKind::UnknownSystem {
                    value: record.system.clone(),
                },
            });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_full_header() {
        let rows = parse_rows(
            "Code,Name,Meaning,System,TM2,BMS\n\
             C001,Diabetes,A chronic metabolic disorder,NAMASTE,TM2-1001,ICD-11-5A11\n\
             C002,Hypertension,\"High blood pressure, persistent\",NAMASTE,,\n",
        )
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].bms.as_deref(), Some("ICD-11-5A11"));
        assert_eq!(rows[1].meaning, "High blood pressure, persistent");
        assert!(!rows[1].has_tm2());
        assert!(!rows[1].has_bms());
    }

    #[test]
    fn missing_columns_and_spacing_are_tolerated() {
        let rows = parse_rows("Code, Name, System\n A01 , Alpha , NAMASTE\n\nB02,Beta\n").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].code, "A01");
        assert_eq!(rows[0].name, "Alpha");
        assert_eq!(rows[0].meaning, "");
        assert_eq!(rows[1].system, "");
        assert_eq!(rows[1].tm2, None);
    }

    #[test]
    fn validation_reports_without_rejecting() {
        let rows = vec![
            TabularRow {
                name: "Alpha".to_string(),
                system: "NAMASTE".to_string(),
                ..TabularRow::new("A01")
            },
            TabularRow {
                name: "Alpha again".to_string(),
                system: "ICD-11 TM2".to_string(),
                ..TabularRow::new("A01")
            },
            TabularRow {
                system: "SNOMED".to_string(),
                ..TabularRow::default()
            },
        ];

        let issues = validate_rows(&rows);
        assert_eq!(
            issues.iter().map(|i| (i.row, i.kind.clone())).collect::<Vec<_>>(),
            vec![
                (1, RowIssueKind::DuplicateCode { first_row: 0 }),
                (2, RowIssueKind::EmptyCode),
                (2, RowIssueKind::EmptyName),
                (
                    2,
                    RowIssueKind::UnknownSystem {
                        value: "SNOMED".to_string()
                    }
                ),
            ]
        );
    }

    #[test]
    fn issues_serialize_flat() {
        let issue = RowIssue {
            row: 3,
            kind: RowIssueKind::DuplicateCode { first_row: 1 },
        };
        assert_eq!(
            serde_json::to_value(&issue).unwrap(),
            json!({ "row": 3, "kind": "duplicate-code", "firstRow": 1 })
        );
    }
}
