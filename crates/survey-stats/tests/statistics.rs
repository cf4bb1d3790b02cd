use std::collections::BTreeMap;

use proptest::prelude::*;

use survey_model::{
    CanonicalField, NumericField, RawTable, ResponseSet, SourceFormat, SurveyResponse,
    UNKNOWN_CATEGORY,
};
use survey_stats::compute_statistics;
use survey_transform::{NormalizationOptions, normalize};

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
fn three_row_scenario() {
    let raw = table(
        &["age", "region", "score"],
        &[&["25", "North", "4"], &["bad", "", "5"], &["34", "South", "3"]],
    );
    let outcome = normalize(&raw, &NormalizationOptions::default());
    let stats = compute_statistics(&outcome.responses);

    assert_eq!(stats.total_responses, 3);
    assert_eq!(stats.overall_mean_score, Some(4.0));

    let ages = &stats.age_group_breakdown;
    assert_eq!(ages.count(UNKNOWN_CATEGORY), 1);
    assert_eq!(ages.count("25-34"), 2);
    assert_eq!(ages.total_count(), 3);

    let regions = &stats.regional_breakdown;
    assert_eq!(
        regions.categories().collect::<Vec<_>>(),
        vec!["North", "South", "unknown"]
    );
    assert_eq!(regions.count("North"), 1);
    assert_eq!(regions.count("South"), 1);
    assert_eq!(regions.count(UNKNOWN_CATEGORY), 1);

    let best = stats.best_region.expect("best region");
    assert_eq!(best.category, "North");
    assert_eq!(best.mean_satisfaction, 4.0);

    let top_age = stats.top_age_group.expect("top age group");
    assert_eq!(top_age.category, "25-34");
    assert_eq!(top_age.mean_satisfaction, 3.5);
}

#[test]
fn empty_set_is_null_safe() {
    let stats = compute_statistics(&ResponseSet::default());

    assert_eq!(stats.total_responses, 0);
    assert!(stats.overall_mean_score.is_none());
    assert!(stats.nps.score.is_none());
    assert!(stats.date_range.is_none());
    assert!(stats.best_region.is_none());
    assert_eq!(stats.completion_rate, 0.0);
    assert!(
        stats
            .numeric_summaries
            .iter()
            .all(|s| s.count == 0 && s.mean.is_none() && s.median.is_none())
    );
    assert_eq!(stats.age_group_breakdown.groups.len(), 8);
    assert_eq!(
        stats.regional_breakdown.categories().collect::<Vec<_>>(),
        vec![UNKNOWN_CATEGORY]
    );
}

#[test]
fn summaries_and_completion() {
    let raw = table(
        &["timestamp", "satisfaction", "region"],
        &[
            &["2024-02-01", "1", "East"],
            &["2024-01-15", "2", ""],
            &["", "3", "East"],
            &["2024-03-01", "4", "West"],
        ],
    );
    let outcome = normalize(&raw, &NormalizationOptions::default());
    let stats = compute_statistics(&outcome.responses);

    let summary = stats.summary(NumericField::Satisfaction).expect("summary");
    assert_eq!(summary.count, 4);
    assert_eq!(summary.mean, Some(2.5));
    assert_eq!(summary.median, Some(2.5));
    assert_eq!(summary.p25, Some(1.75));
    assert_eq!(summary.p75, Some(3.25));
    assert_eq!(summary.min, Some(1.0));
    assert_eq!(summary.max, Some(4.0));
    let std_dev = summary.std_dev.expect("std dev");
    assert!((std_dev - 1.25f64.sqrt()).abs() < 1e-12);

    let range = stats.date_range.expect("date range");
    assert_eq!(range.first.to_string(), "2024-01-15");
    assert_eq!(range.last.to_string(), "2024-03-01");

    // 12 mapped cells, one missing date and one unknown region.
    assert!((stats.completion_rate - 10.0 / 12.0 * 100.0).abs() < 1e-9);
}

fn response() -> impl Strategy<Value = SurveyResponse> {
    (
        prop::option::of(0.0f64..120.0),
        prop::sample::select(vec!["North", "South", "unknown", "East"]),
        prop::sample::select(vec!["Male", "Female", "unknown"]),
        prop::option::of(1u8..=5),
        prop::option::of(0u8..=10),
    )
        .prop_map(|(age, region, gender, score, recommend)| SurveyResponse {
            age,
            region: region.to_string(),
            gender: gender.to_string(),
            satisfaction: score.map(f64::from),
            recommend: recommend.map(f64::from),
            ..SurveyResponse::default()
        })
}

proptest! {
    #[test]
    fn breakdowns_account_for_every_response(rows in prop::collection::vec(response(), 0..60)) {
        let mut sources = BTreeMap::new();
        sources.insert(CanonicalField::Age, "age".to_string());
        sources.insert(CanonicalField::Region, "region".to_string());
        let set = ResponseSet::new(rows, sources);
        let stats = compute_statistics(&set);

        for breakdown in stats.breakdowns() {
            prop_assert_eq!(breakdown.total_count(), set.len());
            let last = breakdown.groups.last().map(|g| g.category.as_str());
            prop_assert_eq!(last, Some(UNKNOWN_CATEGORY));
        }
        let distribution: usize = stats.satisfaction_distribution.iter().map(|c| c.count).sum();
        prop_assert_eq!(distribution, set.len());
        prop_assert_eq!(stats.sentiment.total(), set.len());
        let nps = &stats.nps;
        prop_assert_eq!(nps.promoters + nps.passives + nps.detractors, nps.answered);
        prop_assert!((0.0..=100.0).contains(&stats.completion_rate));
    }
}
