//! Extraction rows and provenance

use crate::error::ReservedFieldError;
use indexmap::IndexMap;
use serde::Serialize;

/// Name of the provenance column injected into every row
pub const SOURCE_FILE_FIELD: &str = "source_file";

/// One record produced by an extraction strategy, in emission order
pub type FieldMap = IndexMap<String, String>;

/// A record that has left the executor: strategy fields plus `source_file`
///
/// Rows are never mutated once built. The provenance column is always present
/// and always last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtractionRow {
    fields: FieldMap,
}

impl ExtractionRow {
    /// Stamp a strategy's field map with its source file
    ///
    /// Fails if the map already carries a `source_file` field; strategies are
    /// not allowed to emit it.
    ///
    /// # Examples
    ///
    /// ```
    /// use switchlore_domain::{ExtractionRow, FieldMap};
    ///
    /// let mut fields = FieldMap::new();
    /// fields.insert("interface".to_string(), "Gi0/1".to_string());
    ///
    /// let row = ExtractionRow::with_provenance(fields, "sw1.cfg").unwrap();
    /// assert_eq!(row.source_file(), "sw1.cfg");
    /// assert_eq!(row.get("interface"), Some("Gi0/1"));
    /// ```
    pub fn with_provenance(
        mut fields: FieldMap,
        source_file: &str,
    ) -> Result<Self, ReservedFieldError> {
        if fields.contains_key(SOURCE_FILE_FIELD) {
            return Err(ReservedFieldError(SOURCE_FILE_FIELD.to_string()));
        }
        fields.insert(SOURCE_FILE_FIELD.to_string(), source_file.to_string());
        Ok(Self { fields })
    }

    /// Originating file identifier
    pub fn source_file(&self) -> &str {
        self.fields
            .get(SOURCE_FILE_FIELD)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Value of a field, if present
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Field names in column order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// All fields, including `source_file`
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Number of fields, including `source_file`
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Never true for a built row; present for API symmetry
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
