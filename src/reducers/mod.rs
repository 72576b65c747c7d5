//! Batch reducers: fold a same-timestamp [`Batch`] into a single sample.
//!
//! A [`Reducer`] follows the usual accumulator shape (`create`, `add_input`,
//! `finish`), and gets [`Reducer::reduce`] for free. Aggregators pair a
//! reducer with the k-way merger; swapping the reducer is all it takes to
//! build another aggregator on the same merge.
//!
//! - [`Sum`] -- exact-timestamp summation with integer/real promotion.

mod sum;

pub use sum::Sum;

use crate::error::{AggregateError, Result};
use crate::merger::Batch;
use crate::sample::{Sample, Value};

/// Folds the values of one batch into one value.
pub trait Reducer {
    /// Accumulator carried across `add_input` calls.
    type Acc;

    fn create(&self) -> Self::Acc;

    fn add_input(&self, acc: &mut Self::Acc, value: Value);

    /// Final value, or `None` if nothing was added.
    fn finish(&self, acc: Self::Acc) -> Option<Value>;

    /// Fold every sample of `batch` into one sample stamped with the batch's
    /// timestamp.
    ///
    /// # Errors
    /// [`AggregateError::Internal`] if the batch is empty.
    fn reduce(&self, batch: &Batch) -> Result<Sample> {
        let mut acc = self.create();
        for sample in &batch.samples {
            self.add_input(&mut acc, sample.value());
        }
        let value = self.finish(acc).ok_or_else(|| {
            AggregateError::Internal(format!("empty batch at timestamp {}", batch.timestamp))
        })?;
        Ok(Sample::new(batch.timestamp, value))
    }
}
