//! Aggregators: merge many sorted inputs into one sorted output.
//!
//! An [`Aggregator`] pairs the [`KWayMerger`] with a [`Reducer`]. Calling
//! [`Aggregator::create_aggregator_group`] returns an [`AggregatedSequence`],
//! itself a [`SampleSequence`], whose every pull merges one timestamp's worth
//! of input samples and folds them into one output sample.
//!
//! Output timestamps are strictly increasing, and each timestamp present in
//! any input appears exactly once (given sorted inputs).
//!
//! # Example
//!
//! ```
//! use tsmerge::*;
//!
//! # fn main() -> tsmerge::Result<()> {
//! let mut a = VecSequence::new("a");
//! a.add_sample(Sample::integer(1, 10)).add_sample(Sample::integer(2, 1));
//! let mut b = VecSequence::new("b");
//! b.add_sample(Sample::real(1, 0.5));
//!
//! let out: Vec<Sample> = SumAggregator::new()
//!     .create_aggregator_group(Some(vec![a.boxed(), b.boxed()]))?
//!     .samples()
//!     .collect::<tsmerge::Result<_>>()?;
//!
//! assert_eq!(out, vec![Sample::real(1, 10.5), Sample::integer(2, 1)]);
//! # Ok(())
//! # }
//! ```

use crate::config::MergeConfig;
use crate::error::{AggregateError, Result};
use crate::merger::KWayMerger;
use crate::metrics::MergeStats;
use crate::reducers::{Reducer, Sum};
use crate::sample::Sample;
use crate::sequence::{BoxedSequence, SampleSequence};
use log::debug;

/// Contract shared by every aggregator kind.
pub trait Aggregator {
    type Reducer: Reducer;

    /// Short name used in logs.
    fn name(&self) -> &str;

    fn reducer(&self) -> Self::Reducer;

    fn config(&self) -> &MergeConfig;

    /// Merge `sequences` into one aggregated output sequence.
    ///
    /// An empty list is valid and yields an output that is exhausted from the
    /// start. Inputs are not read until the output is pulled.
    ///
    /// # Errors
    /// [`AggregateError::InvalidArgument`] if `sequences` is `None`.
    fn create_aggregator_group(
        &self,
        sequences: Option<Vec<BoxedSequence>>,
    ) -> Result<AggregatedSequence<Self::Reducer>> {
        let sequences = sequences.ok_or_else(|| {
            AggregateError::InvalidArgument("sequences must not be absent".into())
        })?;
        debug!("{} group over {} sequences", self.name(), sequences.len());
        let merger = KWayMerger::new(sequences, self.config());
        Ok(AggregatedSequence::new(merger, self.reducer()))
    }

    /// [`create_aggregator_group`](Aggregator::create_aggregator_group) over
    /// anything that yields boxed sequences.
    fn aggregate<I>(&self, sequences: I) -> AggregatedSequence<Self::Reducer>
    where
        I: IntoIterator<Item = BoxedSequence>,
    {
        AggregatedSequence::new(
            KWayMerger::new(sequences.into_iter().collect(), self.config()),
            self.reducer(),
        )
    }
}

/// Lazy output of an aggregator.
///
/// An input error fails the pull that hits it. The sequence is exhausted
/// afterwards: no partial sums are produced from the inputs that remain.
pub struct AggregatedSequence<R: Reducer> {
    merger: KWayMerger,
    reducer: R,
    stats: MergeStats,
}

impl<R: Reducer> AggregatedSequence<R> {
    fn new(merger: KWayMerger, reducer: R) -> Self {
        let stats = MergeStats::new(merger.inputs());
        Self {
            merger,
            reducer,
            stats,
        }
    }

    /// Counters for the merge so far.
    pub fn stats(&self) -> MergeStats {
        self.stats
    }
}

impl<R: Reducer> SampleSequence for AggregatedSequence<R> {
    fn has_next(&mut self) -> bool {
        self.merger.has_next()
    }

    fn next_sample(&mut self) -> Result<Sample> {
        let Some(batch) = self.merger.next_batch()? else {
            return Err(AggregateError::ExhaustedSequence);
        };
        self.stats.record_batch(batch.len());
        let sample = self.reducer.reduce(&batch)?;
        self.stats.record_output();
        Ok(sample)
    }
}

/* ===================== SumAggregator ===================== */

/// Sums all input samples sharing a timestamp.
#[derive(Clone, Debug, Default)]
pub struct SumAggregator {
    config: MergeConfig,
}

impl SumAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: MergeConfig) -> Self {
        Self { config }
    }
}

impl Aggregator for SumAggregator {
    type Reducer = Sum;

    fn name(&self) -> &str {
        "sum"
    }

    fn reducer(&self) -> Sum {
        Sum
    }

    fn config(&self) -> &MergeConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::VecSequence;

    #[test]
    fn absent_sequences_rejected() {
        let result = SumAggregator::new().create_aggregator_group(None);
        assert!(matches!(result, Err(AggregateError::InvalidArgument(_))));
    }

    #[test]
    fn empty_list_is_exhausted() {
        let agg = SumAggregator::new();
        let mut out = agg.create_aggregator_group(Some(vec![])).unwrap();
        assert!(!out.has_next());
        let next = out.next_sample();
        assert!(matches!(next, Err(AggregateError::ExhaustedSequence)));
        assert_eq!(out.stats().inputs, 0);
    }

    #[test]
    fn aggregate_accepts_iterators() {
        let inputs = (0..3).map(|i| {
            let samples = vec![Sample::integer(7, i)];
            VecSequence::from_samples("s", samples).boxed()
        });
        let mut out = SumAggregator::new().aggregate(inputs);
        assert_eq!(out.next_sample().unwrap(), Sample::integer(7, 3));
        assert!(!out.has_next());
        assert_eq!(out.stats().max_batch_len, 3);
    }
}
