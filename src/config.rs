//! Merge configuration.
//!
//! A [`MergeConfig`] picks how the k-way merger finds the next timestamp and
//! whether inputs are trusted to be sorted. Every combination produces the
//! same output for sorted inputs.
//!
//! # Example
//!
//! ```
//! use tsmerge::config::{MergeConfig, MergeStrategy, OrderCheck};
//!
//! let cfg = MergeConfig::default()
//!     .with_strategy(MergeStrategy::LinearScan)
//!     .with_order_check(OrderCheck::Validate);
//!
//! let json = r#"{"strategy":"linear_scan","order_check":"validate"}"#;
//! assert_eq!(cfg, MergeConfig::from_json_str(json).unwrap());
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How the merger locates the minimum current timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Min-heap keyed by `(timestamp, cursor index)`; O(log N) per cursor step.
    #[default]
    Heap,
    /// Rescan every cursor on each batch; O(N) per batch.
    LinearScan,
}

/// What to do about inputs that are not actually sorted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderCheck {
    /// Assume inputs are sorted. Unsorted input yields unspecified output.
    #[default]
    Trust,
    /// Fail the pull with `UnsortedInput` as soon as an input goes backwards.
    Validate,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub strategy: MergeStrategy,
    pub order_check: OrderCheck,
}

impl MergeConfig {
    #[must_use]
    pub fn with_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_order_check(mut self, order_check: OrderCheck) -> Self {
        self.order_check = order_check;
        self
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns an error if the text is not a valid config document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("parse merge config")
    }

    /// Load a JSON config file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("in {}", path.display()))
    }

    pub(crate) fn validates_order(&self) -> bool {
        self.order_check == OrderCheck::Validate
    }
}
