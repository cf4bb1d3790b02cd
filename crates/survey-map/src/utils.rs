//! Label normalization shared by the column matcher and the document reader.

/// Lowercases a label and collapses every non-alphanumeric run into one space.
pub fn normalize_label(raw: &str) -> String {
    raw.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `needle` tokens appear as a contiguous run inside `haystack` tokens.
pub fn contains_token_run(haystack: &str, needle: &str) -> bool {
    let hay: Vec<&str> = haystack.split(' ').filter(|t| !t.is_empty()).collect();
    let pin: Vec<&str> = needle.split(' ').filter(|t| !t.is_empty()).collect();
    if pin.is_empty() || pin.len() > hay.len() {
        return false;
    }
    hay.windows(pin.len()).any(|window| window == pin.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_separators_and_case() {
        assert_eq!(normalize_label("  Respondent_Age (yrs) "), "respondent age yrs");
        assert_eq!(normalize_label("Value-for-Money"), "value for money");
        assert_eq!(normalize_label("---"), "");
    }

    #[test]
    fn token_runs_respect_word_boundaries() {
        assert!(contains_token_run("overall satisfaction score", "satisfaction"));
        assert!(contains_token_run("how likely to recommend us", "recommend"));
        assert!(!contains_token_run("update frequency", "date"));
        assert!(!contains_token_run("value", "value for money"));
    }
}
