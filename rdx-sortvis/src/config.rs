//! Defines the configuration structures for SortVis.
//!
//! `SortvisConfig` is deserialized with `serde`, so the defaults a session starts
//! from (element count, value bounds, algorithm, speed, visualization mode) can be
//! kept in a TOML file and overridden through `SORTVIS_*` environment variables.

use crate::common::AlgorithmId;
use crate::content::UiLanguage;
use crate::error::{Result, SortvisError};
use crate::generator::{DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE};
use crate::time::{Pace, DEFAULT_BASE_DELAY};
use anyhow::Context;
use ::config::{Config, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// The top-level configuration for a SortVis session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SortvisConfig {
    /// How many values `generate` produces.
    #[serde(default = "default_element_count")]
    pub element_count: usize,

    /// Inclusive lower bound of generated values.
    #[serde(default = "default_min_value")]
    pub min_value: i64,

    /// Inclusive upper bound of generated values.
    #[serde(default = "default_max_value")]
    pub max_value: i64,

    /// The algorithm selected when a session starts.
    #[serde(default = "default_algorithm")]
    pub algorithm: AlgorithmId,

    /// Speed multiplier. The delay between steps is `base_delay_ms / speed`.
    #[serde(default = "default_speed")]
    pub speed: f64,

    /// The delay between steps at speed `1.0`, in milliseconds.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Presentational only; the engine never looks at it.
    #[serde(default)]
    pub visualization_mode: VisualizationMode,

    /// Language of interface labels (`vi` or `en`).
    #[serde(default)]
    pub language: UiLanguage,
}

/// How a renderer should draw the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualizationMode {
    /// Numbered boxes.
    #[default]
    Boxes,
    /// Bars whose height follows the value.
    Bars,
    /// Boxes whose size follows the value.
    SizedBoxes,
}

impl VisualizationMode {
    pub const ALL: [VisualizationMode; 3] = [
        VisualizationMode::Boxes,
        VisualizationMode::Bars,
        VisualizationMode::SizedBoxes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VisualizationMode::Boxes => "boxes",
            VisualizationMode::Bars => "bars",
            VisualizationMode::SizedBoxes => "sized-boxes",
        }
    }
}

impl fmt::Display for VisualizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for VisualizationMode {
    type Err = SortvisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        VisualizationMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| SortvisError::UnknownMode(s.to_string()))
    }
}

impl Default for SortvisConfig {
    fn default() -> Self {
        Self {
            element_count: default_element_count(),
            min_value: default_min_value(),
            max_value: default_max_value(),
            algorithm: default_algorithm(),
            speed: default_speed(),
            base_delay_ms: default_base_delay_ms(),
            visualization_mode: VisualizationMode::default(),
            language: UiLanguage::default(),
        }
    }
}

impl SortvisConfig {
    /// Loads the configuration from `path` (or an optional `sortvis.toml` in the
    /// working directory) and then from `SORTVIS_*` environment variables.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("sortvis").required(false),
        };
        let settings = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("SORTVIS").try_parsing(true))
            .build()
            .context("failed to read SortVis configuration")?;
        let config: SortvisConfig = settings
            .try_deserialize()
            .context("failed to parse SortVis configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the engine can't honor. Nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        if self.element_count == 0 {
            return Err(SortvisError::InvalidArgument(
                "element_count must be a positive integer".to_string(),
            ));
        }
        if self.min_value > self.max_value {
            return Err(SortvisError::InvalidArgument(format!(
                "min_value {} is greater than max_value {}",
                self.min_value, self.max_value
            )));
        }
        self.pace().map(|_| ())
    }

    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    /// The pace matching the configured speed multiplier.
    pub fn pace(&self) -> Result<Pace> {
        self.pace_for_speed(self.speed)
    }

    pub fn pace_for_speed(&self, speed: f64) -> Result<Pace> {
        Pace::from_speed(self.base_delay(), speed)
    }
}

// --- Default value functions for serde ---

fn default_element_count() -> usize {
    10
}

fn default_min_value() -> i64 {
    DEFAULT_MIN_VALUE
}

fn default_max_value() -> i64 {
    DEFAULT_MAX_VALUE
}

fn default_algorithm() -> AlgorithmId {
    AlgorithmId::Bubble
}

fn default_speed() -> f64 {
    1.0
}

fn default_base_delay_ms() -> u64 {
    DEFAULT_BASE_DELAY.as_millis() as u64
}
