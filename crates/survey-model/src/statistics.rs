//! Aggregate metrics computed once per run and shared by every renderer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::field::NumericField;

/// Descriptive statistics of one numeric field over the whole dataset.
///
/// All values except `count` are `None` when no response carries the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub field: NumericField,
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Population standard deviation.
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub p25: Option<f64>,
    pub p75: Option<f64>,
}

/// Per-category metric for one numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupMetric {
    pub count: usize,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub category: String,
    pub count: usize,
    pub metrics: BTreeMap<NumericField, GroupMetric>,
}

impl GroupStats {
    pub fn mean(&self, field: NumericField) -> Option<f64> {
        self.metrics.get(&field).and_then(|metric| metric.mean)
    }
}

/// A grouped statistic keyed by one categorical dimension, in stable order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub dimension: String,
    pub groups: Vec<GroupStats>,
}

impl Breakdown {
    pub fn get(&self, category: &str) -> Option<&GroupStats> {
        self.groups.iter().find(|group| group.category == category)
    }

    pub fn count(&self, category: &str) -> usize {
        self.get(category).map_or(0, |group| group.count)
    }

    pub fn total_count(&self) -> usize {
        self.groups.iter().map(|group| group.count).sum()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.category.as_str())
    }
}

/// Net Promoter Score over responses that answered the recommend question.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NpsSummary {
    pub answered: usize,
    pub promoters: usize,
    pub passives: usize,
    pub detractors: usize,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentSummary {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

/// Category with the highest mean satisfaction in a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSegment {
    pub category: String,
    pub mean_satisfaction: f64,
    pub count: usize,
}

/// Every metric computed for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsBundle {
    pub total_responses: usize,
    /// Mean satisfaction score.
    pub overall_mean_score: Option<f64>,
    pub numeric_summaries: Vec<NumericSummary>,
    pub age_group_breakdown: Breakdown,
    pub regional_breakdown: Breakdown,
    pub gender_breakdown: Breakdown,
    pub nps: NpsSummary,
    pub sentiment: SentimentSummary,
    pub satisfaction_distribution: Vec<CategoryCount>,
    pub date_range: Option<DateRange>,
    /// Percentage of present values over the mapped canonical fields.
    pub completion_rate: f64,
    pub best_region: Option<TopSegment>,
    pub top_age_group: Option<TopSegment>,
}

impl StatisticsBundle {
    pub fn summary(&self, field: NumericField) -> Option<&NumericSummary> {
        self.numeric_summaries
            .iter()
            .find(|summary| summary.field == field)
    }

    pub fn mean(&self, field: NumericField) -> Option<f64> {
        self.summary(field).and_then(|summary| summary.mean)
    }

    pub fn breakdowns(&self) -> [&Breakdown; 3] {
        [
            &self.age_group_breakdown,
            &self.regional_breakdown,
            &self.gender_breakdown,
        ]
    }
}
