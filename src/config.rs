//! JSON configuration for thresholds, vocabulary and stop labels

use crate::error::Result;
use crate::header::ExtractorConfig;
use crate::layout::{LayoutConfig, Vocabulary};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything tunable about page extraction
///
/// Missing keys fall back to the defaults, so `{}` is a valid document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Geometric thresholds
    pub layout: LayoutConfig,

    /// Extra known words for de-spacing, e.g. names from the document set
    pub vocabulary: Vec<String>,

    /// Use only `vocabulary` instead of adding it to the built-in words
    pub replace_vocabulary: bool,

    /// Stop labels bounding each header field
    pub extractor: ExtractorConfig,
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.layout.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Vocabulary described by this configuration
    pub fn build_vocabulary(&self) -> Result<Vocabulary> {
        let base = if self.replace_vocabulary {
            Vocabulary::empty()
        } else {
            Vocabulary::default()
        };
        base.extend(&self.vocabulary)
    }
}
