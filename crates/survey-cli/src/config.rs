//! Run configuration: CLI flags over an optional TOML file over defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use survey_insight::DEFAULT_MODEL;
use survey_model::SourceFormat;

use crate::cli::AnalyzeArgs;

/// Output root used when neither flag nor file sets one.
pub const DEFAULT_OUTPUT_ROOT: &str = "outputs";

/// Settings accepted in the `--config` TOML file.
///
/// ```toml
/// output_dir = "reports"
///
/// [ai]
/// enabled = true
/// model = "gemini-2.0-flash"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub output_dir: Option<PathBuf>,
    pub ai: FileAiConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileAiConfig {
    pub enabled: Option<bool>,
    pub model: Option<String>,
    pub api_key: Option<String>,
}

pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

/// AI commentary settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiSettings {
    pub enabled: bool,
    pub model: String,
    pub api_key: Option<String>,
}

/// Everything one analysis run needs, resolved before the pipeline starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// `None` selects the built-in sample dataset.
    pub input: Option<PathBuf>,
    /// Declared format; detected from the extension when `None`.
    pub format: Option<SourceFormat>,
    /// Parent of the timestamped run folder.
    pub output_root: PathBuf,
    pub ai: AiSettings,
    /// Allow respondent values in trace logs.
    pub log_data: bool,
}

impl RunConfig {
    /// Merges flags over the file over defaults.
    pub fn resolve(args: &AnalyzeArgs, file: FileConfig, log_data: bool) -> Self {
        let api_key = args
            .api_key
            .clone()
            .or(file.ai.api_key)
            .filter(|key| !key.trim().is_empty());
        Self {
            input: args.input.clone(),
            format: args.format.map(SourceFormat::from),
            output_root: args
                .output_dir
                .clone()
                .or(file.output_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_ROOT)),
            ai: AiSettings {
                enabled: !args.no_ai && file.ai.enabled.unwrap_or(true),
                model: args
                    .model
                    .clone()
                    .or(file.ai.model)
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                api_key,
            },
            log_data,
        }
    }

    /// Reads `--config` when given, then resolves.
    pub fn from_args(args: &AnalyzeArgs, log_data: bool) -> Result<Self> {
        let file = match &args.config {
            Some(path) => load_file_config(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::resolve(args, file, log_data))
    }
}
