//! Assertion functions for checking aggregated output.

use crate::error::Result;
use crate::merger::Batch;
use crate::reducers::{Reducer, Sum};
use crate::sample::{Sample, TimestampMs, Value};
use crate::sequence::SampleSequence;
use std::collections::BTreeMap;

/// Drain a sequence into a `Vec`, stopping at the first error.
///
/// # Errors
/// The first error returned by the sequence.
pub fn collect_samples<S: SampleSequence>(seq: S) -> Result<Vec<Sample>> {
    seq.samples().collect()
}

/// Assert that two sample lists are equal in order, timestamp, and value tag.
///
/// # Panics
///
/// Panics if the lists differ in length or content.
///
/// # Example
///
/// ```
/// use tsmerge::Sample;
/// use tsmerge::testing::assert_samples_equal;
///
/// let actual = vec![Sample::integer(1, 33)];
/// assert_samples_equal(&actual, &[Sample::integer(1, 33)]);
/// ```
pub fn assert_samples_equal(actual: &[Sample], expected: &[Sample]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Sample count mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Sample mismatch at index {i}:\n  Expected: {e}\n  Actual: {a}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Like [`assert_samples_equal`], but real values only need to agree within
/// `epsilon`. Integer values and value tags must still match exactly.
///
/// # Panics
///
/// Panics on a length, timestamp, tag, or value mismatch.
pub fn assert_samples_approx_equal(actual: &[Sample], expected: &[Sample], epsilon: f64) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Sample count mismatch:\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a.timestamp(),
            e.timestamp(),
            "Timestamp mismatch at index {i}: expected {e}, got {a}"
        );
        match (a.value(), e.value()) {
            (Value::Integer(x), Value::Integer(y)) => {
                assert_eq!(
                    x, y,
                    "Value mismatch at index {i}: expected {e}, got {a}"
                );
            }
            (Value::Real(x), Value::Real(y)) => {
                assert!(
                    (x - y).abs() <= epsilon,
                    "Value mismatch at index {i}: expected {e}, got {a} (eps {epsilon})"
                );
            }
            _ => panic!("Value type mismatch at index {i}: expected {e}, got {a}"),
        }
    }
}

/// Assert that timestamps are strictly increasing.
///
/// # Panics
///
/// Panics at the first pair that is out of order or shares a timestamp.
pub fn assert_strictly_increasing(samples: &[Sample]) {
    for (i, w) in samples.windows(2).enumerate() {
        assert!(
            w[0].timestamp() < w[1].timestamp(),
            "Timestamps not strictly increasing at index {}: {} then {}",
            i + 1,
            w[0],
            w[1]
        );
    }
}

/// Reference result for summing `inputs`: group every sample by timestamp
/// and fold each group with [`Sum`] in input order.
///
/// This is a straightforward materialize-and-group oracle; use it to check
/// the streaming merge on arbitrary inputs.
#[must_use]
pub fn reference_sum(inputs: &[Vec<Sample>]) -> Vec<Sample> {
    let mut groups: BTreeMap<TimestampMs, Vec<Sample>> = BTreeMap::new();
    for sample in inputs.iter().flatten() {
        groups.entry(sample.timestamp()).or_default().push(*sample);
    }
    groups
        .into_iter()
        .filter_map(|(timestamp, samples)| {
            let batch = Batch { timestamp, samples };
            Sum.reduce(&batch).ok()
        })
        .collect()
}
