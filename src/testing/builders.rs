//! Builders for in-memory test sequences.

use crate::sample::{Sample, TimestampMs};
use crate::sequence::{BoxedSequence, VecSequence};

/// A fluent builder for a named [`VecSequence`].
///
/// Samples are kept in the order they are added; the builder does not sort.
///
/// # Example
///
/// ```
/// use tsmerge::testing::SequenceBuilder;
///
/// let seq = SequenceBuilder::new("group")
///     .integers(1, &[10, 20, 3])
///     .real(2, 1.5)
///     .build();
///
/// assert_eq!(seq.remaining(), 4);
/// ```
#[derive(Default)]
pub struct SequenceBuilder {
    name: String,
    samples: Vec<Sample>,
}

impl SequenceBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            samples: Vec::new(),
        }
    }

    #[must_use]
    pub fn sample(mut self, sample: Sample) -> Self {
        self.samples.push(sample);
        self
    }

    #[must_use]
    pub fn integer(self, ts: TimestampMs, value: i64) -> Self {
        self.sample(Sample::integer(ts, value))
    }

    #[must_use]
    pub fn real(self, ts: TimestampMs, value: f64) -> Self {
        self.sample(Sample::real(ts, value))
    }

    /// Add several integer samples sharing one timestamp.
    #[must_use]
    pub fn integers(mut self, ts: TimestampMs, values: &[i64]) -> Self {
        let added = values.iter().map(|&v| Sample::integer(ts, v));
        self.samples.extend(added);
        self
    }

    /// Add several real samples sharing one timestamp.
    #[must_use]
    pub fn reals(mut self, ts: TimestampMs, values: &[f64]) -> Self {
        let added = values.iter().map(|&v| Sample::real(ts, v));
        self.samples.extend(added);
        self
    }

    #[must_use]
    pub fn build(self) -> VecSequence {
        VecSequence::from_samples(self.name, self.samples)
    }

    #[must_use]
    pub fn boxed(self) -> BoxedSequence {
        self.build().boxed()
    }

    /// The samples added so far.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

/// Generate `count` sorted sample lists using a fixed-seed LCG.
///
/// Each list has up to `max_len` samples with timestamps drawn from
/// `[0, ts_span)` and sorted, so runs of equal timestamps are common. Roughly
/// one value in `real_every` is real; pass `0` for integers only.
///
/// The output is reproducible for a given `seed`.
///
/// # Example
///
/// ```
/// use tsmerge::Sample;
/// use tsmerge::testing::pseudo_random_sorted;
///
/// let inputs = pseudo_random_sorted(7, 4, 20, 10, 3);
/// assert_eq!(inputs.len(), 4);
/// for seq in &inputs {
///     assert!(seq.is_sorted_by_key(Sample::timestamp));
/// }
/// ```
#[must_use]
pub fn pseudo_random_sorted(
    seed: u32,
    count: usize,
    max_len: usize,
    ts_span: u32,
    real_every: u32,
) -> Vec<Vec<Sample>> {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        state / 65536
    };
    let ts_span = ts_span.max(1);

    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let len = next() as usize % (max_len + 1);
        let mut stamps: Vec<TimestampMs> = (0..len)
            .map(|_| TimestampMs::from(next() % ts_span))
            .collect();
        stamps.sort_unstable();
        let samples = stamps
            .into_iter()
            .map(|ts| {
                let raw = i64::from(next() % 1000) - 500;
                if real_every > 0 && next() % real_every == 0 {
                    Sample::real(ts, raw as f64 / 4.0)
                } else {
                    Sample::integer(ts, raw)
                }
            })
            .collect();
        out.push(samples);
    }
    out
}
