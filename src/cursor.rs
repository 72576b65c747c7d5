use crate::error::{AggregateError, Result};
use crate::sample::{Sample, TimestampMs};
use crate::sequence::{BoxedSequence, SampleSequence};
use log::warn;

/// One-sample lookahead over an input sequence, owned by a single merger.
///
/// The cursor does not touch its sequence until [`MergeCursor::prime`] is
/// called, so building a merger never pulls input.
pub(crate) struct MergeCursor {
    index: usize,
    seq: BoxedSequence,
    current: Option<Sample>,
    last_ts: Option<TimestampMs>,
    validate: bool,
}

impl MergeCursor {
    pub(crate) fn new(index: usize, seq: BoxedSequence, validate: bool) -> Self {
        Self {
            index,
            seq,
            current: None,
            last_ts: None,
            validate,
        }
    }

    /// Fill the lookahead for the first time.
    pub(crate) fn prime(&mut self) -> Result<()> {
        self.refill()
    }

    /// Position of the wrapped sequence in the merger's input list.
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    /// Timestamp of the buffered sample; `None` once the input is exhausted.
    pub(crate) fn current_timestamp(&self) -> Option<TimestampMs> {
        self.current.map(|s| s.timestamp())
    }

    /// True while a sample is buffered.
    pub(crate) fn is_live(&self) -> bool {
        self.current.is_some()
    }

    /// Hand out the buffered sample and refill from the input.
    ///
    /// If the refill fails the taken sample is dropped along with the error.
    /// The cursor is unusable afterwards; the merger stops on the first error.
    pub(crate) fn take_current(&mut self) -> Result<Sample> {
        let sample = self.current.take().ok_or_else(|| {
            AggregateError::Internal(format!("cursor {} taken while exhausted", self.index))
        })?;
        self.refill()?;
        Ok(sample)
    }

    fn refill(&mut self) -> Result<()> {
        if !self.seq.has_next() {
            self.current = None;
            return Ok(());
        }
        let next = self.seq.next_sample()?;
        let ts = next.timestamp();
        if self.validate
            && let Some(prev) = self.last_ts
            && ts < prev
        {
            warn!("input {} went backwards: {ts} after {prev}", self.index);
            return Err(AggregateError::UnsortedInput {
                sequence: self.index,
                previous: prev,
                current: ts,
            });
        }
        self.last_ts = Some(ts);
        self.current = Some(next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::VecSequence;

    fn cursor(samples: Vec<Sample>, validate: bool) -> MergeCursor {
        let seq = VecSequence::from_samples("c", samples).boxed();
        MergeCursor::new(0, seq, validate)
    }

    #[test]
    fn unprimed_cursor_reports_nothing() {
        let c = cursor(vec![Sample::integer(1, 1)], false);
        assert_eq!(c.current_timestamp(), None);
    }

    #[test]
    fn take_advances_lookahead() {
        let mut c = cursor(vec![Sample::integer(1, 1), Sample::integer(4, 2)], false);
        c.prime().unwrap();
        assert_eq!(c.current_timestamp(), Some(1));
        assert_eq!(c.take_current().unwrap(), Sample::integer(1, 1));
        assert_eq!(c.current_timestamp(), Some(4));
        assert_eq!(c.take_current().unwrap(), Sample::integer(4, 2));
        assert_eq!(c.current_timestamp(), None);
    }

    #[test]
    fn take_while_exhausted_is_internal_error() {
        let mut c = cursor(vec![], false);
        c.prime().unwrap();
        assert!(matches!(c.take_current(), Err(AggregateError::Internal(_))));
    }

    #[test]
    fn validation_catches_regression() {
        let mut c = cursor(vec![Sample::integer(5, 1), Sample::integer(3, 1)], true);
        c.prime().unwrap();
        match c.take_current() {
            Err(AggregateError::UnsortedInput { current, .. }) => assert_eq!(current, 3),
            other => panic!("expected unsorted input, got {other:?}"),
        }
    }

    #[test]
    fn trust_mode_passes_regression_through() {
        let mut c = cursor(vec![Sample::integer(5, 1), Sample::integer(3, 1)], false);
        c.prime().unwrap();
        c.take_current().unwrap();
        assert_eq!(c.current_timestamp(), Some(3));
    }
}
