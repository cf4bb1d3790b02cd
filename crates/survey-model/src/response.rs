//! Canonical survey responses and the normalized dataset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::field::{CanonicalField, CategoricalField, NumericField, UNKNOWN_CATEGORY};

/// One respondent's canonical record.
///
/// Numeric, date and text fields are `None` when missing. Categorical fields
/// always carry a value and fall back to [`UNKNOWN_CATEGORY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub respondent_id: Option<String>,
    pub submitted_on: Option<NaiveDate>,
    pub age: Option<f64>,
    pub gender: String,
    pub region: String,
    pub purchase_frequency: String,
    pub satisfaction: Option<f64>,
    pub product_quality: Option<f64>,
    pub customer_service: Option<f64>,
    pub value_for_money: Option<f64>,
    pub recommend: Option<f64>,
    pub comment: Option<String>,
}

impl Default for SurveyResponse {
    fn default() -> Self {
        Self {
            respondent_id: None,
            submitted_on: None,
            age: None,
            gender: UNKNOWN_CATEGORY.to_string(),
            region: UNKNOWN_CATEGORY.to_string(),
            purchase_frequency: UNKNOWN_CATEGORY.to_string(),
            satisfaction: None,
            product_quality: None,
            customer_service: None,
            value_for_money: None,
            recommend: None,
            comment: None,
        }
    }
}

impl SurveyResponse {
    pub fn numeric(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::Age => self.age,
            NumericField::Satisfaction => self.satisfaction,
            NumericField::ProductQuality => self.product_quality,
            NumericField::CustomerService => self.customer_service,
            NumericField::ValueForMoney => self.value_for_money,
            NumericField::Recommend => self.recommend,
        }
    }

    pub fn set_numeric(&mut self, field: NumericField, value: Option<f64>) {
        let slot = match field {
            NumericField::Age => &mut self.age,
            NumericField::Satisfaction => &mut self.satisfaction,
            NumericField::ProductQuality => &mut self.product_quality,
            NumericField::CustomerService => &mut self.customer_service,
            NumericField::ValueForMoney => &mut self.value_for_money,
            NumericField::Recommend => &mut self.recommend,
        };
        *slot = value;
    }

    pub fn category(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::Gender => &self.gender,
            CategoricalField::Region => &self.region,
            CategoricalField::PurchaseFrequency => &self.purchase_frequency,
        }
    }

    pub fn set_category(&mut self, field: CategoricalField, value: impl Into<String>) {
        let slot = match field {
            CategoricalField::Gender => &mut self.gender,
            CategoricalField::Region => &mut self.region,
            CategoricalField::PurchaseFrequency => &mut self.purchase_frequency,
        };
        *slot = value.into();
    }

    /// Whether the field holds a real value (`unknown` counts as absent).
    pub fn is_present(&self, field: CanonicalField) -> bool {
        match field {
            CanonicalField::RespondentId => self.respondent_id.is_some(),
            CanonicalField::SubmittedOn => self.submitted_on.is_some(),
            CanonicalField::Comment => self.comment.is_some(),
            other => {
                if let Some(numeric) = other.as_numeric() {
                    self.numeric(numeric).is_some()
                } else if let Some(categorical) = other.as_categorical() {
                    self.category(categorical) != UNKNOWN_CATEGORY
                } else {
                    false
                }
            }
        }
    }

    /// Text rendering of a field for tabular exports; missing values are empty.
    pub fn display_value(&self, field: CanonicalField) -> String {
        match field {
            CanonicalField::RespondentId => self.respondent_id.clone().unwrap_or_default(),
            CanonicalField::SubmittedOn => self
                .submitted_on
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            CanonicalField::Comment => self.comment.clone().unwrap_or_default(),
            other => {
                if let Some(numeric) = other.as_numeric() {
                    self.numeric(numeric).map(format_number).unwrap_or_default()
                } else if let Some(categorical) = other.as_categorical() {
                    self.category(categorical).to_string()
                } else {
                    String::new()
                }
            }
        }
    }
}

/// Formats a number without a trailing `.0` for whole values.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// The normalized dataset for one run. Row order follows the source table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseSet {
    responses: Vec<SurveyResponse>,
    /// Raw column that fed each mapped canonical field.
    field_sources: BTreeMap<CanonicalField, String>,
}

impl ResponseSet {
    pub fn new(
        responses: Vec<SurveyResponse>,
        field_sources: BTreeMap<CanonicalField, String>,
    ) -> Self {
        Self {
            responses,
            field_sources,
        }
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SurveyResponse> {
        self.responses.iter()
    }

    pub fn responses(&self) -> &[SurveyResponse] {
        &self.responses
    }

    pub fn field_sources(&self) -> &BTreeMap<CanonicalField, String> {
        &self.field_sources
    }

    /// Canonical fields that were mapped from a source column.
    pub fn mapped_fields(&self) -> Vec<CanonicalField> {
        self.field_sources.keys().copied().collect()
    }

    pub fn is_mapped(&self, field: CanonicalField) -> bool {
        self.field_sources.contains_key(&field)
    }
}

impl<'a> IntoIterator for &'a ResponseSet {
    type Item = &'a SurveyResponse;
    type IntoIter = std::slice::Iter<'a, SurveyResponse>;

    fn into_iter(self) -> Self::IntoIter {
        self.responses.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_response_buckets_categories_as_unknown() {
        let response = SurveyResponse::default();
        for field in CategoricalField::ALL {
            assert_eq!(response.category(field), UNKNOWN_CATEGORY);
            assert!(!response.is_present(field.field()));
        }
    }

    #[test]
    fn display_value_drops_trailing_zero() {
        let mut response = SurveyResponse::default();
        response.set_numeric(NumericField::Age, Some(30.0));
        response.set_numeric(NumericField::Recommend, Some(7.5));
        assert_eq!(response.display_value(CanonicalField::Age), "30");
        assert_eq!(response.display_value(CanonicalField::Recommend), "7.5");
        assert_eq!(response.display_value(CanonicalField::Satisfaction), "");
        assert_eq!(response.display_value(CanonicalField::Region), "unknown");
    }
}
