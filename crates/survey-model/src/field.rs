use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Category assigned to a categorical value that is empty or unusable.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Storage kind of a canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Date,
    Numeric,
    Categorical,
}

/// Fields of the canonical survey response schema, in export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    RespondentId,
    SubmittedOn,
    Age,
    Gender,
    Region,
    PurchaseFrequency,
    Satisfaction,
    ProductQuality,
    CustomerService,
    ValueForMoney,
    Recommend,
    Comment,
}

impl CanonicalField {
    /// Every canonical field in export order.
    pub const ALL: [CanonicalField; 12] = [
        CanonicalField::RespondentId,
        CanonicalField::SubmittedOn,
        CanonicalField::Age,
        CanonicalField::Gender,
        CanonicalField::Region,
        CanonicalField::PurchaseFrequency,
        CanonicalField::Satisfaction,
        CanonicalField::ProductQuality,
        CanonicalField::CustomerService,
        CanonicalField::ValueForMoney,
        CanonicalField::Recommend,
        CanonicalField::Comment,
    ];

    /// Canonical column name, as written to exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::RespondentId => "respondent_id",
            CanonicalField::SubmittedOn => "submitted_on",
            CanonicalField::Age => "age",
            CanonicalField::Gender => "gender",
            CanonicalField::Region => "region",
            CanonicalField::PurchaseFrequency => "purchase_frequency",
            CanonicalField::Satisfaction => "satisfaction",
            CanonicalField::ProductQuality => "product_quality",
            CanonicalField::CustomerService => "customer_service",
            CanonicalField::ValueForMoney => "value_for_money",
            CanonicalField::Recommend => "recommend",
            CanonicalField::Comment => "comment",
        }
    }

    /// Human-readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            CanonicalField::RespondentId => "Respondent ID",
            CanonicalField::SubmittedOn => "Submitted On",
            CanonicalField::Age => "Age",
            CanonicalField::Gender => "Gender",
            CanonicalField::Region => "Region",
            CanonicalField::PurchaseFrequency => "Purchase Frequency",
            CanonicalField::Satisfaction => "Satisfaction",
            CanonicalField::ProductQuality => "Product Quality",
            CanonicalField::CustomerService => "Customer Service",
            CanonicalField::ValueForMoney => "Value for Money",
            CanonicalField::Recommend => "Likelihood to Recommend",
            CanonicalField::Comment => "Comment",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            CanonicalField::RespondentId | CanonicalField::Comment => FieldKind::Text,
            CanonicalField::SubmittedOn => FieldKind::Date,
            CanonicalField::Gender | CanonicalField::Region | CanonicalField::PurchaseFrequency => {
                FieldKind::Categorical
            }
            CanonicalField::Age
            | CanonicalField::Satisfaction
            | CanonicalField::ProductQuality
            | CanonicalField::CustomerService
            | CanonicalField::ValueForMoney
            | CanonicalField::Recommend => FieldKind::Numeric,
        }
    }

    pub fn as_numeric(&self) -> Option<NumericField> {
        NumericField::ALL
            .into_iter()
            .find(|numeric| numeric.field() == *self)
    }

    pub fn as_categorical(&self) -> Option<CategoricalField> {
        CategoricalField::ALL
            .into_iter()
            .find(|categorical| categorical.field() == *self)
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalField {
    type Err = ModelError;

    /// Parses a canonical field name (case-insensitive, `-` or space accepted for `_`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        CanonicalField::ALL
            .into_iter()
            .find(|field| field.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}

/// Numeric fields of the canonical schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    Age,
    Satisfaction,
    ProductQuality,
    CustomerService,
    ValueForMoney,
    Recommend,
}

impl NumericField {
    pub const ALL: [NumericField; 6] = [
        NumericField::Age,
        NumericField::Satisfaction,
        NumericField::ProductQuality,
        NumericField::CustomerService,
        NumericField::ValueForMoney,
        NumericField::Recommend,
    ];

    /// Numeric fields that hold 1-5 rating scores.
    pub const SCORES: [NumericField; 4] = [
        NumericField::Satisfaction,
        NumericField::ProductQuality,
        NumericField::CustomerService,
        NumericField::ValueForMoney,
    ];

    pub fn field(&self) -> CanonicalField {
        match self {
            NumericField::Age => CanonicalField::Age,
            NumericField::Satisfaction => CanonicalField::Satisfaction,
            NumericField::ProductQuality => CanonicalField::ProductQuality,
            NumericField::CustomerService => CanonicalField::CustomerService,
            NumericField::ValueForMoney => CanonicalField::ValueForMoney,
            NumericField::Recommend => CanonicalField::Recommend,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.field().as_str()
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorical fields of the canonical schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    Gender,
    Region,
    PurchaseFrequency,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 3] = [
        CategoricalField::Gender,
        CategoricalField::Region,
        CategoricalField::PurchaseFrequency,
    ];

    pub fn field(&self) -> CanonicalField {
        match self {
            CategoricalField::Gender => CanonicalField::Gender,
            CategoricalField::Region => CanonicalField::Region,
            CategoricalField::PurchaseFrequency => CanonicalField::PurchaseFrequency,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.field().as_str()
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
