//! # tsmerge
//!
//! Streaming aggregation of sorted time series.
//!
//! Given any number of input sequences, each a forward-only stream of
//! [`Sample`]s sorted by timestamp, an [`Aggregator`] produces one output
//! sequence holding exactly one sample per distinct input timestamp, in
//! strictly increasing order. The output sample is the reduction (for
//! [`SumAggregator`], the sum) of every input sample carrying that timestamp,
//! across all inputs and within each input.
//!
//! ## Key Features
//!
//! - **Lazy k-way merge** - inputs are read one sample at a time, on demand
//! - **Integer/real promotion** - sums stay integral until a real value joins
//! - **Pluggable reducers** - implement [`Reducer`] for other aggregations
//! - **Configurable merge** - heap or linear-scan strategy, optional order validation
//! - **File-backed inputs** - JSON Lines and CSV, compressed or not (feature flags)
//! - **Merge statistics** - per-aggregation counters via [`MergeStats`]
//!
//! ## Quick Start
//!
//! ```
//! use tsmerge::*;
//!
//! # fn main() -> tsmerge::Result<()> {
//! let mut cpu0 = VecSequence::new("cpu0");
//! cpu0.add_sample(Sample::integer(1, 10))
//!     .add_sample(Sample::integer(1, 20))
//!     .add_sample(Sample::integer(2, 1));
//!
//! let mut cpu1 = VecSequence::new("cpu1");
//! cpu1.add_sample(Sample::integer(1, 3))
//!     .add_sample(Sample::real(3, 0.5));
//!
//! let mut total = SumAggregator::new()
//!     .create_aggregator_group(Some(vec![cpu0.boxed(), cpu1.boxed()]))?;
//!
//! assert_eq!(total.next_sample()?, Sample::integer(1, 33));
//! assert_eq!(total.next_sample()?, Sample::integer(2, 1));
//! assert_eq!(total.next_sample()?, Sample::real(3, 0.5));
//! assert!(!total.has_next());
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Samples
//!
//! A [`Sample`] is a `(timestamp, value)` pair. Timestamps are signed
//! milliseconds ([`TimestampMs`]); the value is a [`Value`], either an
//! `Integer(i64)` or a `Real(f64)`.
//!
//! ### Sequences
//!
//! [`SampleSequence`] is the pull interface shared by inputs and outputs:
//! `has_next` peeks, `next_sample` consumes. Pulling past the end is an
//! [`AggregateError::ExhaustedSequence`] error. Sequences are single-pass and
//! owned by whoever consumes them.
//!
//! ### Merging and reducing
//!
//! [`KWayMerger`] groups all input samples sharing the smallest pending
//! timestamp into a [`Batch`]; a [`Reducer`] folds a batch into one sample.
//! [`Sum`] adds integers with wrapping arithmetic, and promotes the whole
//! group to `f64` as soon as one real value is seen.
//!
//! ## Configuration
//!
//! ```
//! use tsmerge::*;
//!
//! let cfg = MergeConfig::default()
//!     .with_strategy(MergeStrategy::LinearScan)
//!     .with_order_check(OrderCheck::Validate);
//! let agg = SumAggregator::with_config(cfg);
//! assert_eq!(agg.config().strategy, MergeStrategy::LinearScan);
//! ```
//!
//! ## Feature Flags
//!
//! - `io-jsonl` - JSON Lines backed sequences
//! - `io-csv` - CSV backed sequences
//! - `compression-gzip`, `compression-zstd`, `compression-bzip2`, `compression-xz` -
//!   transparent decompression of input files
//!
//! ## Module Overview
//!
//! - [`sample`] - timestamps, values and samples
//! - [`sequence`] - the pull interface and in-memory sequences
//! - [`merger`] - the k-way merge
//! - [`reducers`] - per-timestamp folds
//! - [`aggregator`] - merge plus reduce, as an output sequence
//! - [`config`] - merge configuration
//! - [`metrics`] - merge statistics
//! - [`io`] - file-backed sequences
//! - [`testing`] - assertions, builders and fixtures for tests

pub mod aggregator;
pub mod config;
mod cursor;
pub mod error;
pub mod io;
pub mod merger;
pub mod metrics;
pub mod reducers;
pub mod sample;
pub mod sequence;
pub mod testing;

pub use aggregator::{AggregatedSequence, Aggregator, SumAggregator};
pub use config::{MergeConfig, MergeStrategy, OrderCheck};
pub use error::{AggregateError, Result};
pub use merger::{Batch, KWayMerger};
pub use metrics::MergeStats;
pub use reducers::{Reducer, Sum};
pub use sample::{Sample, TimestampMs, Value};
pub use sequence::{
    BoxedSequence, IterSequence, SampleSequence, Samples, TryIterSequence, VecSequence,
};

#[cfg(feature = "io-jsonl")]
pub use io::jsonl::{JsonlSequence, open_jsonl_glob};

#[cfg(feature = "io-csv")]
pub use io::csv::{CsvSequence, open_csv_glob};
