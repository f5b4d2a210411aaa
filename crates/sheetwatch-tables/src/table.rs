//! In-memory table representation.
//!
//! A [`Table`] is the raw shape a source hands back: a header row followed by
//! data rows of display strings. [`Record`] is one data row keyed by header
//! name, with absent columns surfacing as an explicit `None` rather than a
//! lookup panic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

/// A named table: header names plus data rows.
///
/// Row values are kept as the display strings the source returned; typing
/// them (percentages, booleans, recipient lists) is the engine's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// The table name within its source.
    pub name: String,
    /// Column header names, in source order.
    pub headers: Vec<String>,
    /// Data rows. May be ragged; short rows simply lack trailing columns.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Builds a table from raw cell values, treating the first row as headers.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MissingHeader`] if `values` is empty.
    pub fn from_values(name: impl Into<String>, mut values: Vec<Vec<String>>) -> Result<Self> {
        let name = name.into();
        if values.is_empty() {
            return Err(TableError::MissingHeader { name });
        }
        let headers = values.remove(0);
        Ok(Self {
            name,
            headers,
            rows: values,
        })
    }

    /// Returns the data rows as header-keyed records, dropping fully blank rows.
    #[must_use]
    pub fn records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .map(|row| Record::from_row(&self.headers, row))
            .collect()
    }

    /// Returns true if the table has a column with this exact header name.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }
}

/// One data row keyed by header name.
///
/// Built by zipping headers with cells; a ragged row yields fewer fields,
/// and duplicate headers keep the last cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    /// Builds a record by pairing headers with row cells.
    #[must_use]
    pub fn from_row(headers: &[String], row: &[String]) -> Self {
        let fields = headers
            .iter()
            .zip(row.iter())
            .map(|(h, v)| (h.clone(), v.clone()))
            .collect();
        Self { fields }
    }

    /// Returns the raw value of a column, or `None` if the column is absent.
    ///
    /// Column-name drift (e.g. `"v MoM"` vs `"v MoM "`) therefore shows up
    /// as a missing field, never a runtime key error.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Returns the trimmed value of a column, defaulting to `""` when absent.
    #[must_use]
    pub fn get_trimmed(&self, column: &str) -> &str {
        self.get(column).unwrap_or("").trim()
    }

    /// Returns true if the record carries this column at all.
    #[must_use]
    pub fn has_field(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Number of populated fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| (*s).to_string()).collect()
    }

    mod table_tests {
        use super::*;

        #[test]
        fn from_values_splits_header_row() {
            let table = Table::from_values(
                "Latest",
                vec![
                    strings(&["Metric", "v MoM"]),
                    strings(&["Revenue", "6.5%"]),
                ],
            )
            .unwrap();

            assert_eq!(table.headers, strings(&["Metric", "v MoM"]));
            assert_eq!(table.rows.len(), 1);
        }

        #[test]
        fn from_values_empty_fails() {
            let result = Table::from_values("Latest", vec![]);
            assert!(matches!(result, Err(TableError::MissingHeader { name }) if name == "Latest"));
        }

        #[test]
        fn records_drop_fully_blank_rows() {
            let table = Table::from_values(
                "Latest",
                vec![
                    strings(&["Metric", "v MoM"]),
                    strings(&["Revenue", "6.5%"]),
                    strings(&["", "  "]),
                    strings(&["Churn", "-2.0%"]),
                ],
            )
            .unwrap();

            let records = table.records();
            assert_eq!(records.len(), 2);
            assert_eq!(records[0].get("Metric"), Some("Revenue"));
            assert_eq!(records[1].get("Metric"), Some("Churn"));
        }

        #[test]
        fn has_column_is_exact_match() {
            let table =
                Table::from_values("Latest", vec![strings(&["Metric", "v MoM"])]).unwrap();
            assert!(table.has_column("v MoM"));
            assert!(!table.has_column("v MoM "));
        }
    }

    mod record_tests {
        use super::*;

        #[test]
        fn get_returns_cell_by_header() {
            let record = Record::from_row(
                &strings(&["Metric", "v MoM"]),
                &strings(&["Revenue", "6.5%"]),
            );
            assert_eq!(record.get("Metric"), Some("Revenue"));
            assert_eq!(record.get("v MoM"), Some("6.5%"));
        }

        #[test]
        fn absent_column_is_none_not_panic() {
            let record = Record::from_row(&strings(&["Metric"]), &strings(&["Revenue"]));
            assert_eq!(record.get("v MoM"), None);
            assert!(!record.has_field("v MoM"));
        }

        #[test]
        fn ragged_row_lacks_trailing_fields() {
            let record = Record::from_row(
                &strings(&["Metric", "v MoM", "v YoY"]),
                &strings(&["Revenue", "6.5%"]),
            );
            assert_eq!(record.len(), 2);
            assert_eq!(record.get("v YoY"), None);
        }

        #[test]
        fn get_trimmed_defaults_to_empty() {
            let record = Record::from_row(&strings(&["Metric"]), &strings(&["  Revenue "]));
            assert_eq!(record.get_trimmed("Metric"), "Revenue");
            assert_eq!(record.get_trimmed("Missing"), "");
        }
    }
}
