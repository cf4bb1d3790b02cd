//! Statistics engine for normalized survey responses.
//!
//! Everything is computed once per run from a [`survey_model::ResponseSet`]
//! and returned as an immutable [`survey_model::StatisticsBundle`]. Empty
//! inputs degrade to zero counts and `None` means rather than errors.

pub mod breakdown;
pub mod descriptive;
pub mod engine;

pub use breakdown::{
    AGE_BUCKETS, AGE_GROUP_DIMENSION, age_bucket, age_bucket_labels, age_group_breakdown,
    categorical_breakdown,
};
pub use engine::{classify_sentiment, compute_statistics, net_promoter_score};
