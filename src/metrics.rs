//! Statistics gathered while an aggregation runs.
//!
//! Every [`AggregatedSequence`](crate::aggregator::AggregatedSequence) keeps a
//! [`MergeStats`] that is updated synchronously on each pull. Read it with
//! `stats()` at any point; after the output is exhausted it describes the
//! whole merge.
//!
//! # Example
//!
//! ```
//! use tsmerge::*;
//!
//! # fn main() -> tsmerge::Result<()> {
//! let a = VecSequence::from_samples("a", vec![Sample::integer(1, 1), Sample::integer(2, 2)]);
//! let b = VecSequence::from_samples("b", vec![Sample::integer(1, 5)]);
//!
//! let mut out = SumAggregator::new().create_aggregator_group(Some(vec![a.boxed(), b.boxed()]))?;
//! while out.has_next() {
//!     out.next_sample()?;
//! }
//!
//! let stats = out.stats();
//! assert_eq!(stats.samples_in, 3);
//! assert_eq!(stats.samples_out, 2);
//! assert_eq!(stats.max_batch_len, 2);
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Counters for one merge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Number of input sequences.
    pub inputs: usize,
    /// Input samples consumed so far.
    pub samples_in: u64,
    /// Output samples produced so far.
    pub samples_out: u64,
    /// Same-timestamp batches pulled from the merger.
    pub batches: u64,
    /// Largest batch seen.
    pub max_batch_len: usize,
}

impl MergeStats {
    pub(crate) fn new(inputs: usize) -> Self {
        Self {
            inputs,
            ..Default::default()
        }
    }

    pub(crate) fn record_batch(&mut self, len: usize) {
        self.batches += 1;
        self.samples_in += len as u64;
        self.max_batch_len = self.max_batch_len.max(len);
    }

    pub(crate) fn record_output(&mut self) {
        self.samples_out += 1;
    }

    /// Mean samples per batch, or `0.0` before the first batch.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_batch_len(&self) -> f64 {
        if self.batches == 0 {
            0.0
        } else {
            self.samples_in as f64 / self.batches as f64
        }
    }

    /// All counters as a JSON object, each with a description.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "inputs": { "value": self.inputs, "description": "Input sequences merged" },
            "samples_in": { "value": self.samples_in, "description": "Input samples consumed" },
            "samples_out": { "value": self.samples_out, "description": "Output samples produced" },
            "batches": { "value": self.batches, "description": "Same-timestamp batches merged" },
            "max_batch_len": { "value": self.max_batch_len, "description": "Largest batch" },
            "mean_batch_len": {
                "value": self.mean_batch_len(),
                "description": "Mean samples per batch"
            },
        })
    }

    /// Print the counters to stdout in a human-readable format.
    pub fn print(&self) {
        println!("\n=========== Merge Metrics ============");
        println!("inputs: {}", self.inputs);
        println!("samples_in: {}", self.samples_in);
        println!("samples_out: {}", self.samples_out);
        println!("batches: {}", self.batches);
        println!("max_batch_len: {}", self.max_batch_len);
        println!("mean_batch_len: {:.3}", self.mean_batch_len());
        println!("======================================\n");
    }

    /// Save the counters to a pretty-printed JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written to.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::create(path)
            .with_context(|| format!("create {}", path.display()))?;
        let formatted = serde_json::to_string_pretty(&self.to_json())?;
        file.write_all(formatted.as_bytes())?;
        Ok(())
    }
}
