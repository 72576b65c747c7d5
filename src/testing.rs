//! Testing utilities for aggregation pipelines.
//!
//! Helpers for writing tests against [`SampleSequence`](crate::SampleSequence)
//! outputs:
//!
//! - **Assertions**: compare aggregated output with expected samples
//! - **Builders**: assemble input sequences fluently, or generate reproducible
//!   random sorted inputs
//! - **Fixtures**: canned grouped inputs with known sums
//!
//! # Quick Start
//!
//! ```
//! use tsmerge::*;
//! use tsmerge::testing::*;
//!
//! # fn main() -> tsmerge::Result<()> {
//! let a = SequenceBuilder::new("a").integers(1, &[10, 20]).integer(2, 1);
//! let b = SequenceBuilder::new("b").integer(1, 3);
//!
//! let out = SumAggregator::new().create_aggregator_group(Some(vec![a.boxed(), b.boxed()]))?;
//! let got = collect_samples(out)?;
//!
//! assert_strictly_increasing(&got);
//! assert_samples_equal(&got, &[Sample::integer(1, 33), Sample::integer(2, 1)]);
//! # Ok(())
//! # }
//! ```
//!
//! # Checking against a reference
//!
//! [`reference_sum`] groups every input sample in memory and folds each
//! group. It is the straightforward answer the streaming merge must agree
//! with:
//!
//! ```
//! use tsmerge::*;
//! use tsmerge::testing::*;
//!
//! # fn main() -> tsmerge::Result<()> {
//! let inputs = pseudo_random_sorted(3, 5, 40, 16, 0);
//! let expected = reference_sum(&inputs);
//!
//! let seqs = inputs.into_iter().map(|s| VecSequence::from_samples("r", s).boxed());
//! let got = collect_samples(SumAggregator::new().aggregate(seqs))?;
//! assert_samples_equal(&got, &expected);
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
