//! Per-field resolution policy.
//!
//! The normalizer consults only this table to decide how a raw value is
//! coerced, which range is valid, and what a missing value becomes.

use survey_model::{CanonicalField, FieldKind, UNKNOWN_CATEGORY};

/// Value stored when a field is missing or unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingDefault {
    /// Field is left empty (`None`).
    Missing,
    /// Field is bucketed into a fixed category.
    Category(&'static str),
}

/// Resolution rules for one canonical field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldPolicy {
    pub field: CanonicalField,
    pub kind: FieldKind,
    /// Inclusive valid range for numeric fields.
    pub range: Option<(f64, f64)>,
    /// Numeric field also accepts `26-35` and `55+` ranges.
    pub accepts_ranges: bool,
    /// Lowercased spellings mapped to their canonical category.
    pub synonyms: &'static [(&'static str, &'static str)],
    pub missing: MissingDefault,
}

impl FieldPolicy {
    pub fn in_range(&self, value: f64) -> bool {
        self.range
            .is_none_or(|(min, max)| value >= min && value <= max)
    }

    pub fn synonym(&self, key: &str) -> Option<&'static str> {
        self.synonyms
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, canonical)| *canonical)
    }
}

const GENDER_SYNONYMS: &[(&str, &str)] = &[
    ("m", "Male"),
    ("male", "Male"),
    ("man", "Male"),
    ("f", "Female"),
    ("female", "Female"),
    ("woman", "Female"),
    ("nb", "Non-binary"),
    ("non binary", "Non-binary"),
    ("non-binary", "Non-binary"),
    ("nonbinary", "Non-binary"),
    ("prefer not to say", "Prefer not to say"),
    ("prefer not to answer", "Prefer not to say"),
];

const fn text(field: CanonicalField) -> FieldPolicy {
    FieldPolicy {
        field,
        kind: FieldKind::Text,
        range: None,
        accepts_ranges: false,
        synonyms: &[],
        missing: MissingDefault::Missing,
    }
}

const fn score(field: CanonicalField, min: f64, max: f64) -> FieldPolicy {
    FieldPolicy {
        field,
        kind: FieldKind::Numeric,
        range: Some((min, max)),
        accepts_ranges: false,
        synonyms: &[],
        missing: MissingDefault::Missing,
    }
}

const fn categorical(
    field: CanonicalField,
    synonyms: &'static [(&'static str, &'static str)],
) -> FieldPolicy {
    FieldPolicy {
        field,
        kind: FieldKind::Categorical,
        range: None,
        accepts_ranges: false,
        synonyms,
        missing: MissingDefault::Category(UNKNOWN_CATEGORY),
    }
}

/// Policy table in canonical field order.
pub const FIELD_POLICIES: [FieldPolicy; 12] = [
    text(CanonicalField::RespondentId),
    FieldPolicy {
        field: CanonicalField::SubmittedOn,
        kind: FieldKind::Date,
        range: None,
        accepts_ranges: false,
        synonyms: &[],
        missing: MissingDefault::Missing,
    },
    FieldPolicy {
        field: CanonicalField::Age,
        kind: FieldKind::Numeric,
        range: Some((0.0, 120.0)),
        accepts_ranges: true,
        synonyms: &[],
        missing: MissingDefault::Missing,
    },
    categorical(CanonicalField::Gender, GENDER_SYNONYMS),
    categorical(CanonicalField::Region, &[]),
    categorical(CanonicalField::PurchaseFrequency, &[]),
    score(CanonicalField::Satisfaction, 1.0, 5.0),
    score(CanonicalField::ProductQuality, 1.0, 5.0),
    score(CanonicalField::CustomerService, 1.0, 5.0),
    score(CanonicalField::ValueForMoney, 1.0, 5.0),
    score(CanonicalField::Recommend, 0.0, 10.0),
    text(CanonicalField::Comment),
];

/// Looks up the policy of a canonical field.
pub fn policy_for(field: CanonicalField) -> &'static FieldPolicy {
    // One entry per field, in declaration order.
    &FIELD_POLICIES[field as usize]
}
