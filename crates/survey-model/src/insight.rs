//! AI-generated commentary attached to a run.

use serde::{Deserialize, Serialize};

/// Narrative sections produced by an insight provider.
///
/// A section that could not be generated carries placeholder text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
    /// Name of the provider that produced the text.
    pub provider: String,
    pub summary: String,
    pub trends: String,
    pub recommendations: String,
}
