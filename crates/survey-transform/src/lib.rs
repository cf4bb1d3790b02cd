//! Normalization of raw survey tables into canonical responses.
//!
//! Column matching comes from `survey-map`; every coercion and missing-value
//! decision is driven by the [`policy::FIELD_POLICIES`] table.

pub mod normalization;
pub mod normalizer;
pub mod policy;

pub use normalizer::{NormalizationOptions, NormalizationOutcome, REDACTED_VALUE, normalize};
pub use policy::{FIELD_POLICIES, FieldPolicy, MissingDefault, policy_for};
