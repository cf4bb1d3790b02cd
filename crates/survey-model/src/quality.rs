use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::field::CanonicalField;
use crate::raw::SkippedRow;

/// A raw column no canonical field claimed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnmappedColumn {
    pub column: String,
    /// Closest canonical field by label similarity, when similar enough.
    pub closest_field: Option<CanonicalField>,
    pub similarity: Option<f64>,
}

/// Recoverable conditions found while reading and normalizing one input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataQuality {
    pub input_rows: usize,
    pub skipped_rows: Vec<SkippedRow>,
    pub coercion_warnings: BTreeMap<CanonicalField, usize>,
    pub unmapped_columns: Vec<UnmappedColumn>,
    /// Canonical fields with no source column.
    pub missing_fields: Vec<CanonicalField>,
    pub empty_dataset: bool,
}

impl DataQuality {
    pub fn skipped_count(&self) -> usize {
        self.skipped_rows.len()
    }

    pub fn warning_count(&self) -> usize {
        self.coercion_warnings.values().sum()
    }

    pub fn warnings_for(&self, field: CanonicalField) -> usize {
        self.coercion_warnings.get(&field).copied().unwrap_or(0)
    }

    pub fn record_warning(&mut self, field: CanonicalField) {
        *self.coercion_warnings.entry(field).or_insert(0) += 1;
    }

    /// True when nothing was skipped, coerced away or left unmapped.
    pub fn is_clean(&self) -> bool {
        self.skipped_rows.is_empty()
            && self.warning_count() == 0
            && self.unmapped_columns.is_empty()
            && !self.empty_dataset
    }
}
