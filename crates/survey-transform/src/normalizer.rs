//! Raw table to canonical response set.

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, info, info_span, trace, warn};

use survey_map::{ColumnMapping, map_columns};
use survey_model::{CanonicalField, DataQuality, FieldKind, RawTable, ResponseSet, SurveyResponse};

use crate::normalization::{
    CategoryOutcome, NumericOutcome, is_null_token, normalize_category, parse_numeric,
    parse_submission_date,
};
use crate::policy::{MissingDefault, policy_for};

/// Placeholder logged instead of respondent values unless value logging is on.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Options for normalization.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizationOptions {
    /// Include raw respondent values in trace logs.
    pub log_values: bool,
}

impl NormalizationOptions {
    pub fn with_log_values(mut self, enable: bool) -> Self {
        self.log_values = enable;
        self
    }

    fn redact<'a>(&self, value: &'a str) -> &'a str {
        if self.log_values {
            value
        } else {
            REDACTED_VALUE
        }
    }
}

/// Normalized responses plus the conditions recovered along the way.
#[derive(Debug, Clone)]
pub struct NormalizationOutcome {
    pub responses: ResponseSet,
    pub quality: DataQuality,
    pub mapping: ColumnMapping,
}

/// Outcome of resolving one raw cell.
enum Resolved {
    Set,
    Missing,
    Warning,
}

/// Maps raw columns onto the canonical schema and coerces every value.
///
/// Row order is preserved and the result depends only on the table content.
pub fn normalize(table: &RawTable, options: &NormalizationOptions) -> NormalizationOutcome {
    let span = info_span!("normalize", source = %table.source());
    let _guard = span.enter();
    let start = Instant::now();

    let mapping = map_columns(table.headers());
    let mut quality = DataQuality {
        input_rows: table.input_row_count(),
        skipped_rows: table.skipped().to_vec(),
        unmapped_columns: mapping.unmapped.clone(),
        missing_fields: mapping.missing_fields(),
        ..DataQuality::default()
    };

    let mut responses = Vec::with_capacity(table.row_count());
    for (row_idx, row) in table.rows().iter().enumerate() {
        let mut response = SurveyResponse::default();
        for assignment in &mapping.assignments {
            let raw = row
                .get(assignment.column_index)
                .map_or("", String::as_str);
            if let Resolved::Warning = resolve_value(&mut response, assignment.field, raw) {
                trace!(
                    row = row_idx + 1,
                    field = %assignment.field,
                    value = options.redact(raw),
                    "value could not be coerced"
                );
                quality.record_warning(assignment.field);
            }
        }
        responses.push(response);
    }

    for (field, count) in &quality.coercion_warnings {
        warn!(field = %field, count, "values could not be coerced and were treated as missing");
    }
    if !mapping.unmapped.is_empty() {
        debug!(
            columns = ?mapping.unmapped.iter().map(|c| c.column.as_str()).collect::<Vec<_>>(),
            "ignored unmapped columns"
        );
    }

    let field_sources: BTreeMap<CanonicalField, String> = mapping
        .assignments
        .iter()
        .map(|assignment| (assignment.field, assignment.column.clone()))
        .collect();
    quality.empty_dataset = responses.is_empty();
    if quality.empty_dataset {
        warn!("no responses remain after reading; statistics will be empty");
    }

    info!(
        responses = responses.len(),
        mapped_fields = field_sources.len(),
        warnings = quality.warning_count(),
        duration_ms = start.elapsed().as_millis(),
        "normalization complete"
    );

    NormalizationOutcome {
        responses: ResponseSet::new(responses, field_sources),
        quality,
        mapping,
    }
}

fn resolve_value(response: &mut SurveyResponse, field: CanonicalField, raw: &str) -> Resolved {
    let policy = policy_for(field);
    match policy.kind {
        FieldKind::Text => {
            let trimmed = raw.trim();
            let value = (!trimmed.is_empty()).then(|| trimmed.to_string());
            let resolved = if value.is_some() {
                Resolved::Set
            } else {
                Resolved::Missing
            };
            match field {
                CanonicalField::RespondentId => response.respondent_id = value,
                _ => response.comment = value,
            }
            resolved
        }
        FieldKind::Date => {
            if raw.trim().is_empty() || is_null_token(raw) {
                return Resolved::Missing;
            }
            match parse_submission_date(raw) {
                Some(date) => {
                    response.submitted_on = Some(date);
                    Resolved::Set
                }
                None => Resolved::Warning,
            }
        }
        FieldKind::Numeric => {
            let Some(numeric) = field.as_numeric() else {
                return Resolved::Missing;
            };
            match parse_numeric(raw, policy.accepts_ranges) {
                NumericOutcome::Missing => Resolved::Missing,
                NumericOutcome::Value(value) if policy.in_range(value) => {
                    response.set_numeric(numeric, Some(value));
                    Resolved::Set
                }
                NumericOutcome::Value(_) | NumericOutcome::Invalid => Resolved::Warning,
            }
        }
        FieldKind::Categorical => {
            let Some(categorical) = field.as_categorical() else {
                return Resolved::Missing;
            };
            let fallback = match policy.missing {
                MissingDefault::Category(category) => category,
                MissingDefault::Missing => survey_model::UNKNOWN_CATEGORY,
            };
            match normalize_category(raw, policy) {
                CategoryOutcome::Value(value) => {
                    response.set_category(categorical, value);
                    Resolved::Set
                }
                CategoryOutcome::Unknown => {
                    response.set_category(categorical, fallback);
                    Resolved::Missing
                }
                CategoryOutcome::Invalid => {
                    response.set_category(categorical, fallback);
                    Resolved::Warning
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_model::{NumericField, SourceFormat, UNKNOWN_CATEGORY};

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            "inline",
            SourceFormat::CSV,
            headers.iter().map(|h| (*h).to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|v| (*v).to_string()).collect())
                .collect(),
            Vec::new(),
        )
    }

    #[test]
    fn coerces_and_counts_warnings() {
        let raw = table(
            &["Age", "Region", "Score"],
            &[&["25", "North", "4"], &["bad", "", "5"], &["34", "South", "$3"]],
        );
        let outcome = normalize(&raw, &NormalizationOptions::default());
        let responses = outcome.responses.responses();

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0].age, Some(25.0));
        assert_eq!(responses[1].age, None);
        assert_eq!(responses[1].region, UNKNOWN_CATEGORY);
        assert_eq!(responses[2].numeric(NumericField::Satisfaction), Some(3.0));
        assert_eq!(outcome.quality.warnings_for(CanonicalField::Age), 1);
        assert_eq!(outcome.quality.warnings_for(CanonicalField::Region), 0);
        assert!(!outcome.quality.empty_dataset);
    }

    #[test]
    fn out_of_range_scores_become_missing() {
        let raw = table(&["satisfaction", "nps"], &[&["7", "11"], &["0", "10"]]);
        let outcome = normalize(&raw, &NormalizationOptions::default());
        let responses = outcome.responses.responses();
        assert_eq!(responses[0].satisfaction, None);
        assert_eq!(responses[0].recommend, None);
        assert_eq!(responses[1].satisfaction, None);
        assert_eq!(responses[1].recommend, Some(10.0));
        assert_eq!(outcome.quality.warnings_for(CanonicalField::Satisfaction), 2);
        assert_eq!(outcome.quality.warnings_for(CanonicalField::Recommend), 1);
    }

    #[test]
    fn redacts_values_by_default() {
        let options = NormalizationOptions::default();
        assert_eq!(options.redact("secret"), REDACTED_VALUE);
        assert_eq!(options.with_log_values(true).redact("secret"), "secret");
    }
}
