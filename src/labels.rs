/*!
 * Localized labels used when naming output files.
 *
 * The merger only needs three strings: the suffix for merged and for
 * translated files, and the base name used when two input names share no
 * characters. They are looked up through the [`LabelProvider`] trait so a
 * front end can inject its own resources.
 */

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;

use crate::language_utils;

/// Suffix for translate-mode output when the merge label is selected
pub const MERGED_KEY: &str = "merged";
/// Suffix for translate-mode output
pub const TRANSLATED_KEY: &str = "translated";
/// Base name used when the input names have nothing in common
pub const FINAL_NAME_KEY: &str = "final_name";

const ENGLISH: &[(&str, &str)] = &[
    (MERGED_KEY, "merged"),
    (TRANSLATED_KEY, "translated"),
    (FINAL_NAME_KEY, "Merged"),
];

const SPANISH: &[(&str, &str)] = &[
    (MERGED_KEY, "fusionado"),
    (TRANSLATED_KEY, "traducido"),
    (FINAL_NAME_KEY, "Fusionado"),
];

const FRENCH: &[(&str, &str)] = &[
    (MERGED_KEY, "fusionné"),
    (TRANSLATED_KEY, "traduit"),
    (FINAL_NAME_KEY, "Fusionné"),
];

const GERMAN: &[(&str, &str)] = &[
    (MERGED_KEY, "zusammengeführt"),
    (TRANSLATED_KEY, "übersetzt"),
    (FINAL_NAME_KEY, "Zusammengeführt"),
];

/// Source of localized strings (key to text)
pub trait LabelProvider: Send + Sync + fmt::Debug {
    fn label(&self, key: &str) -> Option<String>;
}

fn lookup(table: &[(&str, &str)], key: &str) -> Option<String> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
}

/// Resolve a label, falling back to English and finally to the key itself
pub fn text(provider: &dyn LabelProvider, key: &str) -> String {
    provider
        .label(key)
        .or_else(|| lookup(ENGLISH, key))
        .unwrap_or_else(|| key.to_string())
}

/// Compiled-in label tables
#[derive(Debug, Clone)]
pub struct BuiltinLabels {
    language: &'static str,
    table: &'static [(&'static str, &'static str)],
}

impl BuiltinLabels {
    pub fn english() -> Self {
        BuiltinLabels { language: "en", table: ENGLISH }
    }

    /// Table for an ISO 639 code; unknown languages fall back to English
    pub fn for_language(code: &str) -> Self {
        let normalized = language_utils::normalize_to_part1_or_part2t(code).unwrap_or_default();
        match normalized.as_str() {
            "en" => Self::english(),
            "es" => BuiltinLabels { language: "es", table: SPANISH },
            "fr" => BuiltinLabels { language: "fr", table: FRENCH },
            "de" => BuiltinLabels { language: "de", table: GERMAN },
            _ => {
                warn!("No labels for language '{}', using English", code);
                Self::english()
            }
        }
    }

    pub fn language(&self) -> &str {
        self.language
    }
}

impl Default for BuiltinLabels {
    fn default() -> Self {
        Self::english()
    }
}

impl LabelProvider for BuiltinLabels {
    fn label(&self, key: &str) -> Option<String> {
        lookup(self.table, key)
    }
}

/// Labels supplied at runtime, e.g. from a JSON resource file
#[derive(Debug, Clone, Default)]
pub struct MapLabels {
    labels: HashMap<String, String>,
}

impl MapLabels {
    pub fn new(labels: HashMap<String, String>) -> Self {
        MapLabels { labels }
    }

    /// Load a flat JSON object of `"key": "text"` pairs
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read labels file: {}", path.display()))?;
        let labels: HashMap<String, String> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse labels file: {}", path.display()))?;
        Ok(MapLabels { labels })
    }
}

impl LabelProvider for MapLabels {
    fn label(&self, key: &str) -> Option<String> {
        self.labels.get(key).cloned()
    }
}
