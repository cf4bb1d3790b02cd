//! Grouped statistics by categorical dimension.

use std::collections::{BTreeMap, BTreeSet};

use survey_model::{
    Breakdown, CategoricalField, GroupMetric, GroupStats, NumericField, SurveyResponse,
    UNKNOWN_CATEGORY,
};

use crate::descriptive::{mean, population_std_dev};

/// Age buckets as `(label, lower bound inclusive, upper bound exclusive)`.
pub const AGE_BUCKETS: [(&str, f64, f64); 7] = [
    ("under 18", 0.0, 18.0),
    ("18-24", 18.0, 25.0),
    ("25-34", 25.0, 35.0),
    ("35-44", 35.0, 45.0),
    ("45-54", 45.0, 55.0),
    ("55-64", 55.0, 65.0),
    ("65+", 65.0, f64::INFINITY),
];

pub const AGE_GROUP_DIMENSION: &str = "age_group";

/// Bucket label for an age; missing or negative ages are `unknown`.
pub fn age_bucket(age: Option<f64>) -> &'static str {
    age.and_then(|age| {
        AGE_BUCKETS
            .iter()
            .find(|(_, lower, upper)| age >= *lower && age < *upper)
            .map(|(label, _, _)| *label)
    })
    .unwrap_or(UNKNOWN_CATEGORY)
}

/// Every age bucket label in table order, `unknown` last.
pub fn age_bucket_labels() -> impl Iterator<Item = &'static str> {
    AGE_BUCKETS
        .iter()
        .map(|(label, _, _)| *label)
        .chain(std::iter::once(UNKNOWN_CATEGORY))
}

fn group_stats(category: &str, members: &[&SurveyResponse]) -> GroupStats {
    let metrics = NumericField::ALL
        .into_iter()
        .map(|field| {
            let values: Vec<f64> = members
                .iter()
                .filter_map(|response| response.numeric(field))
                .collect();
            (
                field,
                GroupMetric {
                    count: values.len(),
                    mean: mean(&values),
                    std_dev: population_std_dev(&values),
                },
            )
        })
        .collect();
    GroupStats {
        category: category.to_string(),
        count: members.len(),
        metrics,
    }
}

fn build(
    dimension: &str,
    categories: &[String],
    responses: &[SurveyResponse],
    key: impl Fn(&SurveyResponse) -> String,
) -> Breakdown {
    let mut members: BTreeMap<String, Vec<&SurveyResponse>> = BTreeMap::new();
    for response in responses {
        members.entry(key(response)).or_default().push(response);
    }
    let groups = categories
        .iter()
        .map(|category| {
            let group = members.get(category).map_or(&[][..], Vec::as_slice);
            group_stats(category, group)
        })
        .collect();
    Breakdown {
        dimension: dimension.to_string(),
        groups,
    }
}

/// Breakdown over the fixed age buckets; every bucket is always listed.
pub fn age_group_breakdown(responses: &[SurveyResponse]) -> Breakdown {
    let categories: Vec<String> = age_bucket_labels().map(str::to_string).collect();
    build(AGE_GROUP_DIMENSION, &categories, responses, |response| {
        age_bucket(response.age).to_string()
    })
}

/// Breakdown over observed categories, alphabetical with `unknown` last.
pub fn categorical_breakdown(field: CategoricalField, responses: &[SurveyResponse]) -> Breakdown {
    let observed: BTreeSet<&str> = responses
        .iter()
        .map(|response| response.category(field))
        .filter(|category| *category != UNKNOWN_CATEGORY)
        .collect();
    let categories: Vec<String> = observed
        .into_iter()
        .map(str::to_string)
        .chain(std::iter::once(UNKNOWN_CATEGORY.to_string()))
        .collect();
    build(field.as_str(), &categories, responses, |response| {
        response.category(field).to_string()
    })
}
