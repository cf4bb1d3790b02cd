use anyhow::Result;
use comfy_table::{Cell, Table};
use tracing::warn;

use survey_insight::{GeminiProvider, InsightProvider, OfflineProvider};
use survey_map::aliases_for;
use survey_model::{CanonicalField, FieldKind};
use survey_stats::AGE_BUCKETS;
use survey_transform::policy_for;

use crate::cli::AnalyzeArgs;
use crate::config::{AiSettings, RunConfig};
use crate::pipeline::run_analysis;
use crate::summary::{apply_table_style, dim_cell, header_cell};
use crate::types::RunResult;

/// Picks the insight provider; never fails, falling back to offline.
pub fn build_provider(settings: &AiSettings) -> Box<dyn InsightProvider> {
    if !settings.enabled {
        return Box::new(OfflineProvider::new("disabled with --no-ai"));
    }
    let Some(key) = settings.api_key.as_deref() else {
        warn!("no Gemini API key configured (set GEMINI_API_KEY); AI insights disabled");
        return Box::new(OfflineProvider::new("no API key configured"));
    };
    match GeminiProvider::new(key, settings.model.clone()) {
        Ok(provider) => Box::new(provider),
        Err(error) => {
            warn!(%error, "could not create Gemini client; AI insights disabled");
            Box::new(OfflineProvider::new(error.to_string()))
        }
    }
}

pub fn run_analyze(args: &AnalyzeArgs, log_data: bool) -> Result<RunResult> {
    let config = RunConfig::from_args(args, log_data)?;
    let provider = build_provider(&config.ai);
    run_analysis(&config, provider.as_ref())
}

fn kind_label(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "text",
        FieldKind::Date => "date",
        FieldKind::Numeric => "numeric",
        FieldKind::Categorical => "categorical",
    }
}

pub fn run_fields() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Valid range"),
        header_cell("Accepted columns"),
    ]);
    apply_table_style(&mut table);
    for field in CanonicalField::ALL {
        let policy = policy_for(field);
        let range = match policy.range {
            Some((min, max)) => Cell::new(format!("{min}-{max}")),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(field.as_str()),
            Cell::new(kind_label(field.kind())),
            range,
            Cell::new(aliases_for(field).join(", ")),
        ]);
    }
    println!("{table}");

    let buckets: Vec<&str> = AGE_BUCKETS.iter().map(|(label, _, _)| *label).collect();
    println!("Age groups: {}, unknown", buckets.join(", "));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(enabled: bool, key: Option<&str>) -> AiSettings {
        AiSettings {
            enabled,
            model: "gemini-test".to_string(),
            api_key: key.map(str::to_string),
        }
    }

    #[test]
    fn provider_selection() {
        assert_eq!(build_provider(&settings(false, Some("k"))).name(), "offline");
        assert_eq!(build_provider(&settings(true, None)).name(), "offline");
        assert_eq!(build_provider(&settings(true, Some("k"))).name(), "gemini-test");
    }
}
