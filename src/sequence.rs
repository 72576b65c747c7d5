//! Sorted sample sequences: the lazy, forward-only inputs and outputs of
//! aggregation.
//!
//! A [`SampleSequence`] hands out [`Sample`]s in non-decreasing timestamp order
//! and cannot be rewound. The merger relies on that order but does not check
//! it unless asked to (see [`OrderCheck`](crate::config::OrderCheck)).
//!
//! Implementations provided here:
//! - [`VecSequence`] -- named, in-memory backing, fed with [`VecSequence::add_sample`]
//! - [`IterSequence`] -- wraps any `Iterator<Item = Sample>`
//! - [`TryIterSequence`] -- wraps a fallible `Iterator<Item = Result<Sample>>`,
//!   the building block of the file-backed sequences in [`crate::io`]
//!
//! Any sequence can be consumed as a plain iterator through [`SampleSequence::samples`].

use crate::error::{AggregateError, Result};
use crate::sample::Sample;
use std::iter::{Fuse, Peekable};

/// A lazy, forward-only producer of samples in non-decreasing timestamp order.
///
/// `has_next` takes `&mut self` so that lazy implementations can fill a
/// one-sample lookahead, but repeated calls without an intervening
/// `next_sample` must keep returning the same answer.
pub trait SampleSequence {
    /// True iff at least one more sample (or a pending error) is available.
    fn has_next(&mut self) -> bool;

    /// Consume and return the next sample.
    ///
    /// # Errors
    /// [`AggregateError::ExhaustedSequence`] once `has_next` is `false`; I/O or
    /// decode errors from storage-backed implementations.
    fn next_sample(&mut self) -> Result<Sample>;

    /// Adapt this sequence into a standard iterator of `Result<Sample>`.
    fn samples(self) -> Samples<Self>
    where
        Self: Sized,
    {
        Samples { inner: self }
    }
}

/// Owned, type-erased sequence as accepted by aggregators.
pub type BoxedSequence = Box<dyn SampleSequence>;

impl<S> SampleSequence for Box<S>
where
    S: SampleSequence + ?Sized,
{
    fn has_next(&mut self) -> bool {
        self.as_mut().has_next()
    }

    fn next_sample(&mut self) -> Result<Sample> {
        self.as_mut().next_sample()
    }
}

impl<S> SampleSequence for &mut S
where
    S: SampleSequence + ?Sized,
{
    fn has_next(&mut self) -> bool {
        (**self).has_next()
    }

    fn next_sample(&mut self) -> Result<Sample> {
        (**self).next_sample()
    }
}

/// Iterator view over a [`SampleSequence`], see [`SampleSequence::samples`].
pub struct Samples<S> {
    inner: S,
}

impl<S> Samples<S> {
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: SampleSequence> Iterator for Samples<S> {
    type Item = Result<Sample>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.inner.has_next() {
            return None;
        }
        Some(self.inner.next_sample())
    }
}

/* ===================== VecSequence ===================== */

/// In-memory sequence backed by a `Vec<Sample>`, identified by a name.
///
/// Samples may be appended until the sequence is first read from; appending
/// afterwards still works but only samples past the read position are seen.
#[derive(Clone, Debug, Default)]
pub struct VecSequence {
    name: String,
    samples: Vec<Sample>,
    pos: usize,
}

impl VecSequence {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            samples: Vec::new(),
            pos: 0,
        }
    }

    pub fn from_samples(name: impl Into<String>, samples: Vec<Sample>) -> Self {
        Self {
            name: name.into(),
            samples,
            pos: 0,
        }
    }

    pub fn add_sample(&mut self, sample: Sample) -> &mut Self {
        self.samples.push(sample);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Samples not yet consumed.
    pub fn remaining(&self) -> usize {
        self.samples.len() - self.pos
    }

    pub fn boxed(self) -> BoxedSequence {
        Box::new(self)
    }
}

impl SampleSequence for VecSequence {
    fn has_next(&mut self) -> bool {
        self.pos < self.samples.len()
    }

    fn next_sample(&mut self) -> Result<Sample> {
        let Some(&sample) = self.samples.get(self.pos) else {
            return Err(AggregateError::ExhaustedSequence);
        };
        self.pos += 1;
        Ok(sample)
    }
}

/* ===================== IterSequence ===================== */

/// Sequence over any infallible iterator of samples.
pub struct IterSequence<I: Iterator<Item = Sample>> {
    iter: Peekable<Fuse<I>>,
}

impl<I: Iterator<Item = Sample>> IterSequence<I> {
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            iter: iter.into_iter().fuse().peekable(),
        }
    }
    pub fn boxed(self) -> BoxedSequence
    where
        I: 'static,
    {
        Box::new(self)
    }
}

impl<I: Iterator<Item = Sample>> SampleSequence for IterSequence<I> {
    fn has_next(&mut self) -> bool {
        self.iter.peek().is_some()
    }

    fn next_sample(&mut self) -> Result<Sample> {
        self.iter.next().ok_or(AggregateError::ExhaustedSequence)
    }
}

/* ===================== TryIterSequence ===================== */

/// Sequence over a fallible iterator.
///
/// A pending error counts as "has next": it is handed out by the following
/// `next_sample` call, after which the sequence continues with whatever the
/// iterator yields next.
pub struct TryIterSequence<I: Iterator<Item = Result<Sample>>> {
    iter: Peekable<Fuse<I>>,
}

impl<I: Iterator<Item = Result<Sample>>> TryIterSequence<I> {
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            iter: iter.into_iter().fuse().peekable(),
        }
    }
    pub fn boxed(self) -> BoxedSequence
    where
        I: 'static,
    {
        Box::new(self)
    }
}

impl<I: Iterator<Item = Result<Sample>>> SampleSequence for TryIterSequence<I> {
    fn has_next(&mut self) -> bool {
        self.iter.peek().is_some()
    }

    fn next_sample(&mut self) -> Result<Sample> {
        match self.iter.next() {
            Some(item) => item,
            None => Err(AggregateError::ExhaustedSequence),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_exhausted(seq: &mut impl SampleSequence) -> bool {
        let next = seq.next_sample();
        matches!(next, Err(AggregateError::ExhaustedSequence))
    }

    #[test]
    fn vec_sequence_drains_in_order_then_reports_exhaustion() {
        let mut seq = VecSequence::new("group");
        seq.add_sample(Sample::integer(1, 10))
            .add_sample(Sample::integer(2, 20));

        assert!(seq.has_next());
        assert!(seq.has_next());
        assert_eq!(seq.next_sample().unwrap(), Sample::integer(1, 10));
        assert_eq!(seq.remaining(), 1);
        assert_eq!(seq.next_sample().unwrap(), Sample::integer(2, 20));
        assert!(!seq.has_next());
        assert!(is_exhausted(&mut seq));
        assert!(!seq.has_next());
    }

    #[test]
    fn empty_vec_sequence() {
        let mut seq = VecSequence::new("empty");
        assert!(!seq.has_next());
        assert!(is_exhausted(&mut seq));
    }

    #[test]
    fn iter_sequence_peeks_without_consuming() {
        let mut seq = IterSequence::new((0..3).map(|i| Sample::integer(i, i)));
        assert!(seq.has_next());
        assert!(seq.has_next());
        let got: Vec<_> = (&mut seq)
            .samples()
            .map(|r| r.unwrap().timestamp())
            .collect();
        assert_eq!(got, vec![0, 1, 2]);
        assert!(!seq.has_next());
    }

    #[test]
    fn try_iter_sequence_surfaces_error_on_next() {
        let items = vec![
            Ok(Sample::integer(1, 1)),
            Err(AggregateError::Decode("line 2".into())),
            Ok(Sample::integer(3, 3)),
        ];
        let mut seq = TryIterSequence::new(items);
        assert_eq!(seq.next_sample().unwrap(), Sample::integer(1, 1));
        assert!(seq.has_next());
        let err = seq.next_sample();
        assert!(matches!(err, Err(AggregateError::Decode(_))));
        assert_eq!(seq.next_sample().unwrap(), Sample::integer(3, 3));
        assert!(!seq.has_next());
        assert!(is_exhausted(&mut seq));
    }

    #[test]
    fn boxed_sequences_delegate() {
        let samples = vec![Sample::real(5, 0.5)];
        let mut boxed: BoxedSequence = VecSequence::from_samples("b", samples).boxed();
        assert!(boxed.has_next());
        assert_eq!(boxed.next_sample().unwrap(), Sample::real(5, 0.5));
        assert!(!boxed.has_next());
    }
}
