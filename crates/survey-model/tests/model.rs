//! Tests for survey-model types.

use std::collections::BTreeMap;

use survey_model::{
    Breakdown, CanonicalField, DataQuality, DocumentKind, GroupStats, ResponseSet, SourceFormat,
    SurveyResponse, UnmappedColumn,
};

#[test]
fn source_format_serializes_tagged() {
    let json = serde_json::to_value(SourceFormat::CSV).expect("serialize format");
    assert_eq!(json["kind"], "tabular");
    assert_eq!(json["variant"]["delimited"]["delimiter"], 44);

    let pdf = SourceFormat::Document(DocumentKind::Pdf);
    let round: SourceFormat =
        serde_json::from_str(&serde_json::to_string(&pdf).expect("serialize")).expect("parse");
    assert_eq!(round, pdf);
}

#[test]
fn data_quality_serializes_field_keys() {
    let mut quality = DataQuality {
        input_rows: 3,
        unmapped_columns: vec![UnmappedColumn {
            column: "Favourite colour".to_string(),
            closest_field: None,
            similarity: None,
        }],
        ..DataQuality::default()
    };
    quality.record_warning(CanonicalField::ValueForMoney);

    let json = serde_json::to_value(&quality).expect("serialize quality");
    assert_eq!(json["coercion_warnings"]["value_for_money"], 1);
    assert_eq!(json["unmapped_columns"][0]["column"], "Favourite colour");
    assert_eq!(json["empty_dataset"], false);
}

#[test]
fn response_set_tracks_mapped_fields() {
    let mut sources = BTreeMap::new();
    sources.insert(CanonicalField::Region, "Location".to_string());
    sources.insert(CanonicalField::Age, "Respondent Age".to_string());
    let set = ResponseSet::new(vec![SurveyResponse::default()], sources);

    assert_eq!(set.len(), 1);
    assert_eq!(
        set.mapped_fields(),
        vec![CanonicalField::Age, CanonicalField::Region]
    );
    assert!(set.is_mapped(CanonicalField::Region));
    assert!(!set.is_mapped(CanonicalField::Comment));
}

#[test]
fn breakdown_lookup_defaults_to_zero() {
    let breakdown = Breakdown {
        dimension: "region".to_string(),
        groups: vec![
            GroupStats {
                category: "North".to_string(),
                count: 2,
                metrics: BTreeMap::new(),
            },
            GroupStats {
                category: "unknown".to_string(),
                count: 1,
                metrics: BTreeMap::new(),
            },
        ],
    };
    assert_eq!(breakdown.count("North"), 2);
    assert_eq!(breakdown.count("East"), 0);
    assert_eq!(breakdown.total_count(), 3);
    assert_eq!(
        breakdown.categories().collect::<Vec<_>>(),
        vec!["North", "unknown"]
    );
}
