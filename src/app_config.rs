use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use crate::desync::DesyncMode;
use crate::file_utils::Charset;
use crate::labels::{BuiltinLabels, LabelProvider, MapLabels};
use crate::language_utils;
use crate::merger::MergerOptions;

/// Application configuration module
/// This module handles loading, validating and saving the merge settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory for merged files
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Lengthen every caption
    #[serde(default)]
    pub extend: bool,

    /// Extension in seconds
    #[serde(default = "default_extend_secs")]
    pub extend_secs: u64,

    /// Progressive layout
    #[serde(default)]
    pub progressive: bool,

    /// Desynchronization mode (0 = left, 1 = right, 2 = max, 3 = min)
    #[serde(default = "default_desync_mode")]
    pub desync_mode: i64,

    /// Encoding of input and output files
    #[serde(default = "default_charset")]
    pub charset: String,

    /// Name the output as a translation
    #[serde(default)]
    pub translate: bool,

    /// Use the "merged" label in translate mode
    #[serde(default)]
    pub merge_label: bool,

    /// Language of the output-name labels (ISO 639)
    #[serde(default = "default_ui_language")]
    pub ui_language: String,

    /// Optional JSON file with custom labels
    #[serde(default)]
    pub labels_file: Option<String>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_extend_secs() -> u64 {
    2
}

fn default_desync_mode() -> i64 {
    DesyncMode::default().code() as i64
}

fn default_charset() -> String {
    "UTF-8".to_string()
}

fn default_ui_language() -> String {
    "en".to_string()
}

impl Config {
    /// Load the configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        DesyncMode::from_code(self.desync_mode)?;

        Charset::from_name(&self.charset)?;

        language_utils::get_language_name(&self.ui_language)
            .with_context(|| format!("Invalid interface language: {}", self.ui_language))?;

        if self.output_dir.trim().is_empty() {
            return Err(anyhow!("Output directory must not be empty"));
        }

        Ok(())
    }

    pub fn desync(&self) -> Result<DesyncMode> {
        Ok(DesyncMode::from_code(self.desync_mode)?)
    }

    /// Merger settings derived from this configuration
    pub fn merger_options(&self) -> Result<MergerOptions> {
        let mut options = MergerOptions::new(self.output_dir.clone());
        if self.extend {
            options = options.with_extend_secs(self.extend_secs);
        }
        options.progressive = self.progressive;
        options.desync_mode = self.desync()?;
        options.translate = self.translate;
        options.merge_label = self.merge_label;
        options.charset = self.charset.clone();
        Ok(options)
    }

    /// Label provider for output names: the labels file if set, built-in tables otherwise
    pub fn label_provider(&self) -> Result<Arc<dyn LabelProvider>> {
        match &self.labels_file {
            Some(path) => Ok(Arc::new(MapLabels::from_json_file(path)?)),
            None => Ok(Arc::new(BuiltinLabels::for_language(&self.ui_language))),
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            output_dir: default_output_dir(),
            extend: false,
            extend_secs: default_extend_secs(),
            progressive: false,
            desync_mode: default_desync_mode(),
            charset: default_charset(),
            translate: false,
            merge_label: false,
            ui_language: default_ui_language(),
            labels_file: None,
            log_level: LogLevel::default(),
        }
    }
}
