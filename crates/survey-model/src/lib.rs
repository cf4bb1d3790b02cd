pub mod error;
pub mod field;
pub mod insight;
pub mod quality;
pub mod raw;
pub mod response;
pub mod statistics;

pub use error::{ModelError, Result};
pub use field::{CanonicalField, CategoricalField, FieldKind, NumericField, UNKNOWN_CATEGORY};
pub use insight::Insights;
pub use quality::{DataQuality, UnmappedColumn};
pub use raw::{DocumentKind, RawTable, SkippedRow, SourceFormat, TabularKind};
pub use response::{ResponseSet, SurveyResponse, format_number};
pub use statistics::{
    Breakdown, CategoryCount, DateRange, GroupMetric, GroupStats, NpsSummary, NumericSummary,
    Sentiment, SentimentSummary, StatisticsBundle, TopSegment,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_quality_counts() {
        let mut quality = DataQuality::default();
        assert!(quality.is_clean());
        quality.record_warning(CanonicalField::Age);
        quality.record_warning(CanonicalField::Age);
        quality.record_warning(CanonicalField::Satisfaction);
        assert_eq!(quality.warning_count(), 3);
        assert_eq!(quality.warnings_for(CanonicalField::Age), 2);
        assert_eq!(quality.warnings_for(CanonicalField::Region), 0);
        assert!(!quality.is_clean());
    }
}
