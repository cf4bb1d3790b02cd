//! Statistics engine: one pass over a response set into a bundle.

use std::time::Instant;

use tracing::{debug, info, info_span};

use survey_model::{
    Breakdown, CategoricalField, CategoryCount, DateRange, NpsSummary, NumericField, ResponseSet,
    Sentiment, SentimentSummary, StatisticsBundle, SurveyResponse, TopSegment, UNKNOWN_CATEGORY,
};

use crate::breakdown::{age_group_breakdown, categorical_breakdown};
use crate::descriptive::summarize;

const POSITIVE_KEYWORDS: [&str; 11] = [
    "excellent",
    "great",
    "amazing",
    "fantastic",
    "love",
    "perfect",
    "outstanding",
    "wonderful",
    "satisfied",
    "recommend",
    "exceeded",
];

const NEGATIVE_KEYWORDS: [&str; 11] = [
    "poor",
    "bad",
    "terrible",
    "disappointed",
    "awful",
    "horrible",
    "worse",
    "not satisfied",
    "problem",
    "issue",
    "complaint",
];

const PROMOTER_MIN: f64 = 9.0;
const PASSIVE_MIN: f64 = 7.0;

/// Computes every metric of the bundle from the normalized responses.
pub fn compute_statistics(responses: &ResponseSet) -> StatisticsBundle {
    let span = info_span!("statistics", responses = responses.len());
    let _guard = span.enter();
    let start = Instant::now();
    let rows = responses.responses();

    let numeric_summaries: Vec<_> = NumericField::ALL
        .into_iter()
        .map(|field| {
            let values: Vec<f64> = rows.iter().filter_map(|r| r.numeric(field)).collect();
            summarize(field, &values)
        })
        .collect();
    let overall_mean_score = numeric_summaries
        .iter()
        .find(|summary| summary.field == NumericField::Satisfaction)
        .and_then(|summary| summary.mean);

    let age_group_breakdown = age_group_breakdown(rows);
    let regional_breakdown = categorical_breakdown(CategoricalField::Region, rows);
    let gender_breakdown = categorical_breakdown(CategoricalField::Gender, rows);
    debug!(
        age_groups = age_group_breakdown.groups.len(),
        regions = regional_breakdown.groups.len(),
        genders = gender_breakdown.groups.len(),
        "built breakdowns"
    );

    let best_region = top_segment(&regional_breakdown);
    let top_age_group = top_segment(&age_group_breakdown);

    let bundle = StatisticsBundle {
        total_responses: rows.len(),
        overall_mean_score,
        numeric_summaries,
        nps: net_promoter_score(rows),
        sentiment: sentiment_summary(rows),
        satisfaction_distribution: satisfaction_distribution(rows),
        date_range: date_range(rows),
        completion_rate: completion_rate(responses),
        best_region,
        top_age_group,
        age_group_breakdown,
        regional_breakdown,
        gender_breakdown,
    };

    info!(
        responses = bundle.total_responses,
        nps = ?bundle.nps.score,
        completion_rate = bundle.completion_rate,
        duration_ms = start.elapsed().as_millis(),
        "statistics computed"
    );
    bundle
}

/// NPS over responses that answered the recommend question.
pub fn net_promoter_score(rows: &[SurveyResponse]) -> NpsSummary {
    let answers: Vec<f64> = rows.iter().filter_map(|r| r.recommend).collect();
    let promoters = answers.iter().filter(|v| **v >= PROMOTER_MIN).count();
    let passives = answers
        .iter()
        .filter(|v| **v >= PASSIVE_MIN && **v < PROMOTER_MIN)
        .count();
    let detractors = answers.len() - promoters - passives;
    let score = (!answers.is_empty())
        .then(|| (promoters as f64 - detractors as f64) / answers.len() as f64 * 100.0);
    NpsSummary {
        answered: answers.len(),
        promoters,
        passives,
        detractors,
        score,
    }
}

/// Keyword classification of a comment; no comment is neutral.
pub fn classify_sentiment(comment: Option<&str>) -> Sentiment {
    let Some(text) = comment else {
        return Sentiment::Neutral;
    };
    let lowered = text.to_lowercase();
    let positive = POSITIVE_KEYWORDS
        .iter()
        .filter(|word| lowered.contains(*word))
        .count();
    let negative = NEGATIVE_KEYWORDS
        .iter()
        .filter(|word| lowered.contains(*word))
        .count();
    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

fn sentiment_summary(rows: &[SurveyResponse]) -> SentimentSummary {
    let mut summary = SentimentSummary::default();
    for response in rows {
        summary.record(classify_sentiment(response.comment.as_deref()));
    }
    summary
}

/// Counts per rounded satisfaction score 1-5, then `unknown`.
fn satisfaction_distribution(rows: &[SurveyResponse]) -> Vec<CategoryCount> {
    let mut counts = [0usize; 6];
    for response in rows {
        let slot = match response.satisfaction {
            Some(score) => (score.round().clamp(1.0, 5.0) as usize) - 1,
            None => 5,
        };
        counts[slot] += 1;
    }
    counts
        .iter()
        .enumerate()
        .map(|(idx, count)| CategoryCount {
            category: if idx < 5 {
                (idx + 1).to_string()
            } else {
                UNKNOWN_CATEGORY.to_string()
            },
            count: *count,
        })
        .collect()
}

fn date_range(rows: &[SurveyResponse]) -> Option<DateRange> {
    let first = rows.iter().filter_map(|r| r.submitted_on).min()?;
    let last = rows.iter().filter_map(|r| r.submitted_on).max()?;
    Some(DateRange { first, last })
}

/// Percentage of present values over the mapped canonical fields.
fn completion_rate(responses: &ResponseSet) -> f64 {
    let mapped = responses.mapped_fields();
    let cells = responses.len() * mapped.len();
    if cells == 0 {
        return 0.0;
    }
    let present: usize = responses
        .iter()
        .map(|response| {
            mapped
                .iter()
                .filter(|field| response.is_present(**field))
                .count()
        })
        .sum();
    present as f64 / cells as f64 * 100.0
}

/// Highest mean satisfaction, excluding `unknown`; the earlier group wins ties.
fn top_segment(breakdown: &Breakdown) -> Option<TopSegment> {
    let mut best: Option<TopSegment> = None;
    for group in &breakdown.groups {
        if group.category == UNKNOWN_CATEGORY {
            continue;
        }
        let Some(mean) = group.mean(NumericField::Satisfaction) else {
            continue;
        };
        if best
            .as_ref()
            .is_none_or(|current| mean > current.mean_satisfaction)
        {
            best = Some(TopSegment {
                category: group.category.clone(),
                mean_satisfaction: mean,
                count: group.count,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_recommend(value: Option<f64>) -> SurveyResponse {
        SurveyResponse {
            recommend: value,
            ..SurveyResponse::default()
        }
    }

    #[test]
    fn nps_counts_answered_only() {
        let rows = vec![
            with_recommend(Some(10.0)),
            with_recommend(Some(9.0)),
            with_recommend(Some(8.0)),
            with_recommend(Some(3.0)),
            with_recommend(None),
        ];
        let nps = net_promoter_score(&rows);
        assert_eq!(nps.answered, 4);
        assert_eq!(nps.promoters, 2);
        assert_eq!(nps.passives, 1);
        assert_eq!(nps.detractors, 1);
        assert_eq!(nps.score, Some(25.0));
        assert_eq!(net_promoter_score(&[]).score, None);
    }

    #[test]
    fn sentiment_keywords() {
        assert_eq!(classify_sentiment(Some("Love the product")), Sentiment::Positive);
        assert_eq!(classify_sentiment(Some("Price is a problem")), Sentiment::Negative);
        assert_eq!(classify_sentiment(Some("Not satisfied")), Sentiment::Neutral);
        assert_eq!(classify_sentiment(Some("Decent product")), Sentiment::Neutral);
        assert_eq!(classify_sentiment(None), Sentiment::Neutral);
    }

    #[test]
    fn distribution_rounds_and_keeps_unknown() {
        let rows = vec![
            SurveyResponse {
                satisfaction: Some(4.4),
                ..SurveyResponse::default()
            },
            SurveyResponse {
                satisfaction: Some(4.6),
                ..SurveyResponse::default()
            },
            SurveyResponse::default(),
        ];
        let distribution = satisfaction_distribution(&rows);
        assert_eq!(distribution.len(), 6);
        assert_eq!(distribution[3].category, "4");
        assert_eq!(distribution[3].count, 1);
        assert_eq!(distribution[4].count, 1);
        assert_eq!(distribution[5].category, UNKNOWN_CATEGORY);
        assert_eq!(distribution[5].count, 1);
    }
}
