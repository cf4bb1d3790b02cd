//! Column matching engine.

use std::collections::BTreeSet;

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;
use serde::{Deserialize, Serialize};
use tracing::debug;

use survey_model::{CanonicalField, UnmappedColumn};

use crate::alias::{ALIAS_TABLE, aliases_for};
use crate::utils::{contains_token_run, normalize_label};

/// Minimum Jaro-Winkler similarity for an unmatched column to get a hint.
pub const HINT_MIN_SIMILARITY: f64 = 0.85;

/// How a column was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The normalized label equals an alias.
    Exact,
    /// The alias tokens appear as a contiguous run inside the label.
    Contains,
}

/// One raw column claimed by a canonical field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnAssignment {
    pub field: CanonicalField,
    /// Position of the column in the raw header.
    pub column_index: usize,
    pub column: String,
    pub alias: &'static str,
    pub kind: MatchKind,
}

/// Result of matching a raw header against the alias table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "'de: 'static"))]
pub struct ColumnMapping {
    /// Assignments in canonical field order.
    pub assignments: Vec<ColumnAssignment>,
    /// Raw columns no field claimed, in header order.
    pub unmapped: Vec<UnmappedColumn>,
}

impl ColumnMapping {
    pub fn assignment(&self, field: CanonicalField) -> Option<&ColumnAssignment> {
        self.assignments
            .iter()
            .find(|assignment| assignment.field == field)
    }

    pub fn column_index(&self, field: CanonicalField) -> Option<usize> {
        self.assignment(field).map(|assignment| assignment.column_index)
    }

    pub fn is_mapped(&self, field: CanonicalField) -> bool {
        self.assignment(field).is_some()
    }

    /// Canonical fields without a source column, in canonical order.
    pub fn missing_fields(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .filter(|field| !self.is_mapped(*field))
            .collect()
    }
}

/// Maps raw column labels onto canonical fields.
///
/// Two passes over the alias table: exact label matches first, then
/// token-run containment. Within a pass, fields are visited in priority order
/// and aliases in table order; each raw column is claimed at most once.
pub fn map_columns(headers: &[String]) -> ColumnMapping {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_label(h)).collect();
    let mut claimed_columns = BTreeSet::new();
    let mut assignments: Vec<ColumnAssignment> = Vec::new();

    for kind in [MatchKind::Exact, MatchKind::Contains] {
        for (field, aliases) in ALIAS_TABLE {
            if assignments.iter().any(|a| a.field == *field) {
                continue;
            }
            let found = aliases.iter().find_map(|alias| {
                normalized
                    .iter()
                    .enumerate()
                    .find(|(idx, label)| {
                        !claimed_columns.contains(idx) && label_matches(label, alias, kind)
                    })
                    .map(|(idx, _)| (idx, *alias))
            });
            if let Some((idx, alias)) = found {
                debug!(
                    field = %field,
                    column = %headers[idx],
                    alias,
                    kind = ?kind,
                    "mapped column"
                );
                claimed_columns.insert(idx);
                assignments.push(ColumnAssignment {
                    field: *field,
                    column_index: idx,
                    column: headers[idx].clone(),
                    alias,
                    kind,
                });
            }
        }
    }

    assignments.sort_by_key(|assignment| assignment.field);

    let unmapped = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| !claimed_columns.contains(idx))
        .map(|(idx, column)| {
            let hint = closest_field(&normalized[idx]);
            debug!(column = %column, hint = ?hint, "unmapped column");
            UnmappedColumn {
                column: column.clone(),
                closest_field: hint.map(|(field, _)| field),
                similarity: hint.map(|(_, score)| score),
            }
        })
        .collect();

    ColumnMapping {
        assignments,
        unmapped,
    }
}

/// Resolves a single label (for example `Age` in `Age: 34`) to a canonical field.
pub fn resolve_label(label: &str) -> Option<CanonicalField> {
    let normalized = normalize_label(label);
    if normalized.is_empty() {
        return None;
    }
    [MatchKind::Exact, MatchKind::Contains]
        .into_iter()
        .find_map(|kind| {
            ALIAS_TABLE.iter().find_map(|(field, aliases)| {
                aliases
                    .iter()
                    .any(|alias| label_matches(&normalized, alias, kind))
                    .then_some(*field)
            })
        })
}

fn label_matches(label: &str, alias: &str, kind: MatchKind) -> bool {
    match kind {
        MatchKind::Exact => label == alias,
        MatchKind::Contains => contains_token_run(label, alias),
    }
}

/// Best alias similarity for an unmatched label, when above the hint threshold.
fn closest_field(normalized: &str) -> Option<(CanonicalField, f64)> {
    if normalized.is_empty() {
        return None;
    }
    let mut best: Option<(CanonicalField, f64)> = None;
    for (field, _) in ALIAS_TABLE {
        for alias in aliases_for(*field) {
            let score = jaro_similarity(normalized.chars(), alias.chars());
            if best.is_none_or(|(_, current)| score > current) {
                best = Some((*field, score));
            }
        }
    }
    best.filter(|(_, score)| *score >= HINT_MIN_SIMILARITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_document_labels() {
        assert_eq!(resolve_label("Age"), Some(CanonicalField::Age));
        assert_eq!(resolve_label("Overall rating"), Some(CanonicalField::Satisfaction));
        assert_eq!(resolve_label("Respondent #"), None);
        assert_eq!(resolve_label(""), None);
    }

    #[test]
    fn hints_close_misspellings() {
        let (field, score) = closest_field("satisfacton").expect("hint");
        assert_eq!(field, CanonicalField::Satisfaction);
        assert!(score >= HINT_MIN_SIMILARITY);
        assert!(closest_field("favourite colour").is_none());
    }
}
