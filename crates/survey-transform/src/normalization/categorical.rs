//! Categorical value normalization.

use crate::policy::FieldPolicy;

const NULL_TOKENS: [&str; 7] = ["unknown", "n/a", "na", "none", "null", "-", "?"];

/// Result of normalizing one categorical value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryOutcome {
    /// Empty or a null token; bucketed as unknown silently.
    Unknown,
    Value(String),
    /// Has no alphanumeric content; bucketed as unknown with a warning.
    Invalid,
}

/// Whether a raw value spells "no value" (`n/a`, `none`, `?`, ...).
pub fn is_null_token(raw: &str) -> bool {
    let lowered = raw.trim().to_lowercase();
    NULL_TOKENS.contains(&lowered.as_str())
}

/// Uppercases the first character and lowercases the rest.
pub fn sentence_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Trims, collapses whitespace, resolves synonyms and sentence-cases.
pub fn normalize_category(raw: &str, policy: &FieldPolicy) -> CategoryOutcome {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() || is_null_token(&collapsed) {
        return CategoryOutcome::Unknown;
    }
    if !collapsed.chars().any(char::is_alphanumeric) {
        return CategoryOutcome::Invalid;
    }
    if let Some(canonical) = policy.synonym(&collapsed.to_lowercase()) {
        return CategoryOutcome::Value(canonical.to_string());
    }
    CategoryOutcome::Value(sentence_case(&collapsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::policy_for;
    use survey_model::CanonicalField;

    #[test]
    fn sentence_cases_and_collapses() {
        let region = policy_for(CanonicalField::Region);
        assert_eq!(
            normalize_category("  NORTH ", region),
            CategoryOutcome::Value("North".to_string())
        );
        assert_eq!(
            normalize_category("first   TIME", region),
            CategoryOutcome::Value("First time".to_string())
        );
    }

    #[test]
    fn null_tokens_are_unknown_without_warning() {
        let region = policy_for(CanonicalField::Region);
        for raw in ["", "  ", "N/A", "none", "Unknown", "?"] {
            assert_eq!(normalize_category(raw, region), CategoryOutcome::Unknown, "{raw:?}");
        }
        assert_eq!(normalize_category("***", region), CategoryOutcome::Invalid);
    }

    #[test]
    fn gender_synonyms_resolve() {
        let gender = policy_for(CanonicalField::Gender);
        assert_eq!(
            normalize_category("F", gender),
            CategoryOutcome::Value("Female".to_string())
        );
        assert_eq!(
            normalize_category("non   binary", gender),
            CategoryOutcome::Value("Non-binary".to_string())
        );
        assert_eq!(
            normalize_category("Agender", gender),
            CategoryOutcome::Value("Agender".to_string())
        );
    }
}
