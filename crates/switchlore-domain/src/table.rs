//! Column-unified view of heterogeneous rows
//!
//! Rows from different command specifications carry different field sets.
//! The table takes the superset of columns (first-seen order) and null-fills
//! whatever a row does not have.

use crate::record::ExtractionRow;
use serde::Serialize;

/// Tabular result ready for rendering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Column names, in first-seen order
    pub columns: Vec<String>,

    /// One entry per row, aligned with `columns`
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// An empty table with a fixed header
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a table from rows, null-filling absent fields
    ///
    /// # Examples
    ///
    /// ```
    /// use switchlore_domain::{ExtractionRow, FieldMap, Table};
    ///
    /// let mut a = FieldMap::new();
    /// a.insert("version".into(), "15.2".into());
    /// let mut b = FieldMap::new();
    /// b.insert("interface".into(), "Gi0/1".into());
    ///
    /// let rows = vec![
    ///     ExtractionRow::with_provenance(a, "sw1.cfg").unwrap(),
    ///     ExtractionRow::with_provenance(b, "sw1.cfg").unwrap(),
    /// ];
    /// let table = Table::from_rows(&rows);
    ///
    /// assert_eq!(table.columns, vec!["version", "source_file", "interface"]);
    /// assert_eq!(table.rows[1][0], None);
    /// ```
    pub fn from_rows(rows: &[ExtractionRow]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in rows {
            for name in row.field_names() {
                if !columns.iter().any(|c| c == name) {
                    columns.push(name.to_string());
                }
            }
        }

        let rows = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| row.get(column).map(str::to_string))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of one column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).and_then(|v| v.as_deref()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldMap;

    fn row(pairs: &[(&str, &str)], source: &str) -> ExtractionRow {
        let fields: FieldMap = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ExtractionRow::with_provenance(fields, source).unwrap()
    }

    #[test]
    fn test_superset_of_columns() {
        let rows = vec![
            row(&[("interface", "Gi0/1"), ("config", "")], "a.cfg"),
            row(&[("hostname", "sw-a")], "a.cfg"),
        ];
        let table = Table::from_rows(&rows);

        assert_eq!(
            table.columns,
            vec!["interface", "config", "source_file", "hostname"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.column("hostname").unwrap(),
            vec![None, Some("sw-a")]
        );
        assert_eq!(
            table.column("source_file").unwrap(),
            vec![Some("a.cfg"), Some("a.cfg")]
        );
    }

    #[test]
    fn test_empty_rows() {
        let table = Table::from_rows(&[]);
        assert!(table.is_empty());
        assert!(table.columns.is_empty());
    }

    #[test]
    fn test_with_columns_header_only() {
        let table = Table::with_columns(["source_file", "command"]);
        assert_eq!(table.columns.len(), 2);
        assert!(table.is_empty());
        assert_eq!(table.column("command").unwrap(), Vec::<Option<&str>>::new());
        assert!(table.column("missing").is_none());
    }
}
