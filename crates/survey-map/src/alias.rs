//! Fixed alias table used to recognize canonical fields in raw labels.

use survey_model::CanonicalField;

/// Canonical fields with their normalized aliases, in match priority order.
///
/// Specific multi-word fields come before the generic `satisfaction`/`score`
/// and `comment`/`response` catch-alls.
pub const ALIAS_TABLE: &[(CanonicalField, &[&str])] = &[
    (
        CanonicalField::RespondentId,
        &["respondent id", "response id", "participant id", "id"],
    ),
    (
        CanonicalField::SubmittedOn,
        &["submitted on", "timestamp", "response date", "submitted", "date"],
    ),
    (
        CanonicalField::Age,
        &["age", "respondent age", "age group", "yrs", "years"],
    ),
    (CanonicalField::Gender, &["gender", "sex"]),
    (
        CanonicalField::Region,
        &["region", "location", "area", "territory"],
    ),
    (
        CanonicalField::PurchaseFrequency,
        &["purchase frequency", "purchases", "frequency"],
    ),
    (CanonicalField::ProductQuality, &["product quality", "quality"]),
    (
        CanonicalField::CustomerService,
        &["customer service", "service", "support"],
    ),
    (
        CanonicalField::ValueForMoney,
        &["value for money", "value", "price"],
    ),
    (
        CanonicalField::Recommend,
        &["likelihood to recommend", "recommend", "nps"],
    ),
    (
        CanonicalField::Satisfaction,
        &["satisfaction", "satisfied", "score", "rating", "csat"],
    ),
    (
        CanonicalField::Comment,
        &[
            "comment",
            "comments",
            "feedback",
            "remarks",
            "free text",
            "response",
            "notes",
        ],
    ),
];

/// Aliases of one canonical field, in table order.
pub fn aliases_for(field: CanonicalField) -> &'static [&'static str] {
    ALIAS_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == field)
        .map_or(&[], |(_, aliases)| aliases)
}

/// Canonical fields in match priority order.
pub fn match_priority() -> impl Iterator<Item = CanonicalField> {
    ALIAS_TABLE.iter().map(|(field, _)| *field)
}
