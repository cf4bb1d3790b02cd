//! AI commentary over a computed [`StatisticsBundle`].
//!
//! Prompts carry aggregate numbers only, never respondent rows or comments.
//! Provider failures never fail a run: each section falls back to
//! placeholder text.

mod error;
mod gemini;
mod prompts;
mod provider;

use std::time::Instant;

use tracing::{info, info_span, warn};

use survey_model::{Insights, StatisticsBundle};

pub use error::{InsightError, Result};
pub use gemini::{DEFAULT_MODEL, GeminiProvider};
pub use prompts::{InsightKind, build_prompt, explanation_prompt};
pub use provider::{InsightProvider, OfflineProvider};

/// Text substituted for a section the provider could not produce.
pub fn placeholder(section: &str, error: &InsightError) -> String {
    format!("[{section} unavailable: {}]", error.user_message())
}

fn generate_or_placeholder(provider: &dyn InsightProvider, section: &str, prompt: &str) -> String {
    match provider.generate(prompt) {
        Ok(text) => text,
        Err(error) => {
            warn!(provider = provider.name(), section, %error, "insight generation failed");
            placeholder(section, &error)
        }
    }
}

/// Requests every insight section in order.
pub fn collect_insights(provider: &dyn InsightProvider, stats: &StatisticsBundle) -> Insights {
    let span = info_span!("insights", provider = provider.name());
    let _guard = span.enter();
    let start = Instant::now();

    let mut insights = Insights {
        provider: provider.name().to_string(),
        ..Insights::default()
    };
    for kind in InsightKind::ALL {
        let text = generate_or_placeholder(provider, kind.as_str(), &build_prompt(kind, stats));
        match kind {
            InsightKind::Summary => insights.summary = text,
            InsightKind::Trends => insights.trends = text,
            InsightKind::Recommendations => insights.recommendations = text,
        }
    }

    info!(
        duration_ms = start.elapsed().as_millis(),
        "insight sections collected"
    );
    insights
}

/// Requests the explanation of the written output files.
pub fn explain_outputs(
    provider: &dyn InsightProvider,
    stats: &StatisticsBundle,
    files: &[String],
) -> String {
    generate_or_placeholder(provider, "explanation", &explanation_prompt(stats, files))
}
