use survey_map::{MatchKind, map_columns};
use survey_model::CanonicalField;

fn headers(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| (*label).to_string()).collect()
}

#[test]
fn maps_inconsistent_labels() {
    let columns = headers(&[
        "Timestamp",
        "Respondent Age",
        "SEX",
        "Location",
        "Overall Satisfaction Score",
        "Likelihood to Recommend (0-10)",
        "Any other comments?",
        "Favourite colour",
    ]);
    let mapping = map_columns(&columns);

    assert_eq!(mapping.column_index(CanonicalField::SubmittedOn), Some(0));
    assert_eq!(mapping.column_index(CanonicalField::Age), Some(1));
    assert_eq!(mapping.column_index(CanonicalField::Gender), Some(2));
    assert_eq!(mapping.column_index(CanonicalField::Region), Some(3));
    assert_eq!(mapping.column_index(CanonicalField::Satisfaction), Some(4));
    assert_eq!(mapping.column_index(CanonicalField::Recommend), Some(5));
    assert_eq!(mapping.column_index(CanonicalField::Comment), Some(6));

    assert_eq!(mapping.unmapped.len(), 1);
    assert_eq!(mapping.unmapped[0].column, "Favourite colour");
    assert!(mapping.unmapped[0].closest_field.is_none());
}

#[test]
fn exact_matches_win_over_containment() {
    let columns = headers(&["Customer service rating", "Rating"]);
    let mapping = map_columns(&columns);

    let satisfaction = mapping
        .assignment(CanonicalField::Satisfaction)
        .expect("satisfaction mapped");
    assert_eq!(satisfaction.column, "Rating");
    assert_eq!(satisfaction.kind, MatchKind::Exact);

    let service = mapping
        .assignment(CanonicalField::CustomerService)
        .expect("service mapped");
    assert_eq!(service.column, "Customer service rating");
    assert_eq!(service.kind, MatchKind::Contains);
}

#[test]
fn each_column_is_claimed_once() {
    let columns = headers(&["Age", "Age"]);
    let mapping = map_columns(&columns);

    assert_eq!(mapping.column_index(CanonicalField::Age), Some(0));
    assert_eq!(mapping.assignments.len(), 1);
    assert_eq!(mapping.unmapped.len(), 1);
    assert_eq!(mapping.unmapped[0].closest_field, Some(CanonicalField::Age));
}

#[test]
fn first_alias_wins_within_a_field() {
    let columns = headers(&["Notes", "Feedback"]);
    let mapping = map_columns(&columns);
    assert_eq!(mapping.column_index(CanonicalField::Comment), Some(1));
}

#[test]
fn canonical_export_headers_map_to_themselves() {
    let columns: Vec<String> = CanonicalField::ALL
        .iter()
        .map(|field| field.as_str().to_string())
        .collect();
    let mapping = map_columns(&columns);

    for (idx, field) in CanonicalField::ALL.iter().enumerate() {
        assert_eq!(mapping.column_index(*field), Some(idx), "{field}");
    }
    assert!(mapping.unmapped.is_empty());
    assert!(mapping.missing_fields().is_empty());
}

#[test]
fn missing_fields_follow_canonical_order() {
    let mapping = map_columns(&headers(&["Region", "Score"]));
    let missing = mapping.missing_fields();
    assert_eq!(missing.first(), Some(&CanonicalField::RespondentId));
    assert!(!missing.contains(&CanonicalField::Region));
    assert!(!missing.contains(&CanonicalField::Satisfaction));
    assert_eq!(missing.len(), CanonicalField::ALL.len() - 2);
}
