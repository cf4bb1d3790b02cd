//! Error types for insight generation.

use thiserror::Error;

/// Errors returned by an [`InsightProvider`](crate::InsightProvider).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InsightError {
    /// No provider is configured for this run.
    #[error("insight provider unavailable: {0}")]
    Unavailable(String),

    /// Network request failed.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("provider returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The provider answered but produced no text.
    #[error("provider returned no text")]
    EmptyResponse,
}

impl InsightError {
    /// Short explanation suitable for placeholder text in the report.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Unavailable(_) => "AI insights disabled or not configured",
            Self::Network(_) => "could not reach the insight provider",
            Self::Api { status: 401 | 403, .. } => "the insight provider rejected the API key",
            Self::Api { .. } => "the insight provider returned an error",
            Self::EmptyResponse => "the insight provider returned no text",
        }
    }
}

pub type Result<T> = std::result::Result<T, InsightError>;
