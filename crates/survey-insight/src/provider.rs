use crate::error::{InsightError, Result};

/// Text generation backend for AI commentary.
pub trait InsightProvider {
    /// Display name recorded in the report.
    fn name(&self) -> &str;

    /// Generates text for one prompt.
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Provider used when AI insights are disabled or no key is configured.
#[derive(Debug, Clone, Default)]
pub struct OfflineProvider {
    reason: String,
}

impl OfflineProvider {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl InsightProvider for OfflineProvider {
    fn name(&self) -> &str {
        "offline"
    }

    fn generate(&self, _prompt: &str) -> Result<String> {
        Err(InsightError::Unavailable(self.reason.clone()))
    }
}
