//! K-way timestamp merge.
//!
//! [`KWayMerger`] walks N sorted inputs in lockstep and hands out one
//! [`Batch`] per distinct timestamp, smallest first. A batch holds every
//! sample carrying that timestamp across *all* inputs, including runs of
//! equal timestamps inside a single input.
//!
//! Two strategies are available (see [`MergeStrategy`]):
//! - `Heap` keeps a min-heap of `(timestamp, cursor)` entries, one per live
//!   cursor, so a batch costs O(k log N) where k is the batch size.
//! - `LinearScan` rescans every cursor per batch, O(N).
//!
//! Both yield identical batches. Samples inside a batch are ordered by cursor
//! drain order; within one input they keep their input order.
//!
//! Nothing is pulled from the inputs until the first `has_next` or
//! `next_batch` call.

use crate::config::{MergeConfig, MergeStrategy};
use crate::cursor::MergeCursor;
use crate::error::{AggregateError, Result};
use crate::sample::{Sample, TimestampMs};
use crate::sequence::BoxedSequence;
use log::{debug, trace, warn};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// All samples sharing one timestamp.
#[derive(Clone, Debug, PartialEq)]
pub struct Batch {
    pub timestamp: TimestampMs,
    pub samples: Vec<Sample>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Merges sorted inputs into same-timestamp batches.
///
/// The first error raised by any input ends the merge. That error is
/// returned once, from the pull that hit it; afterwards `has_next` is
/// `false` and `next_batch` returns `Ok(None)`. Samples read before the
/// failure are never served in a later batch.
pub struct KWayMerger {
    cursors: Vec<MergeCursor>,
    strategy: MergeStrategy,
    heap: BinaryHeap<Reverse<(TimestampMs, usize)>>,
    primed: bool,
    pending: Option<AggregateError>,
    failed: bool,
}

impl KWayMerger {
    /// Build a merger over `sequences`. Does not read from them.
    pub fn new(sequences: Vec<BoxedSequence>, config: &MergeConfig) -> Self {
        debug!(
            "merging {} input sequences ({:?}, {:?})",
            sequences.len(),
            config.strategy,
            config.order_check
        );
        let validate = config.validates_order();
        let cursors: Vec<MergeCursor> = sequences
            .into_iter()
            .enumerate()
            .map(|(i, seq)| MergeCursor::new(i, seq, validate))
            .collect();
        Self {
            heap: BinaryHeap::with_capacity(cursors.len()),
            cursors,
            strategy: config.strategy,
            primed: false,
            pending: None,
            failed: false,
        }
    }

    /// Number of input sequences.
    pub fn inputs(&self) -> usize {
        self.cursors.len()
    }

    /// True iff another batch (or a pending error) is available.
    pub fn has_next(&mut self) -> bool {
        if self.failed {
            return false;
        }
        if let Err(e) = self.prime() {
            self.pending = Some(e);
        }
        if self.pending.is_some() {
            return true;
        }
        match self.strategy {
            MergeStrategy::Heap => !self.heap.is_empty(),
            MergeStrategy::LinearScan => self.cursors.iter().any(MergeCursor::is_live),
        }
    }

    /// Pull the next batch, or `None` once every input is exhausted.
    ///
    /// # Errors
    /// Propagates the first error raised by an input. The partially built
    /// batch is discarded and the merger is finished from then on.
    pub fn next_batch(&mut self) -> Result<Option<Batch>> {
        if self.failed {
            return Ok(None);
        }
        let pulled = self.pull();
        if let Err(e) = &pulled {
            warn!("merge over {} inputs stopped: {e}", self.cursors.len());
            self.failed = true;
            self.heap.clear();
        }
        pulled
    }

    fn pull(&mut self) -> Result<Option<Batch>> {
        self.prime()?;
        if let Some(e) = self.pending.take() {
            return Err(e);
        }
        let batch = match self.strategy {
            MergeStrategy::Heap => self.next_batch_heap()?,
            MergeStrategy::LinearScan => self.next_batch_scan()?,
        };
        if let Some(b) = &batch {
            trace!("batch at {} with {} samples", b.timestamp, b.len());
        }
        Ok(batch)
    }

    fn prime(&mut self) -> Result<()> {
        if self.primed {
            return Ok(());
        }
        self.primed = true;
        for cursor in &mut self.cursors {
            cursor.prime()?;
            if self.strategy == MergeStrategy::Heap
                && let Some(ts) = cursor.current_timestamp()
            {
                self.heap.push(Reverse((ts, cursor.index())));
            }
        }
        Ok(())
    }

    fn next_batch_heap(&mut self) -> Result<Option<Batch>> {
        let Some(Reverse((t_min, first))) = self.heap.pop() else {
            return Ok(None);
        };
        let mut samples = Vec::new();
        let mut idx = first;
        loop {
            let cursor = &mut self.cursors[idx];
            drain_at(cursor, t_min, &mut samples)?;
            if let Some(ts) = cursor.current_timestamp() {
                self.heap.push(Reverse((ts, idx)));
            }
            match self.heap.peek() {
                Some(Reverse((ts, _))) if *ts == t_min => {
                    if let Some(Reverse((_, next))) = self.heap.pop() {
                        idx = next;
                    }
                }
                _ => break,
            }
        }
        Ok(Some(Batch {
            timestamp: t_min,
            samples,
        }))
    }

    fn next_batch_scan(&mut self) -> Result<Option<Batch>> {
        let cursors = &mut self.cursors;
        let Some(t_min) = cursors.iter().filter_map(|c| c.current_timestamp()).min() else {
            return Ok(None);
        };
        let mut samples = Vec::new();
        for cursor in cursors.iter_mut() {
            if cursor.current_timestamp() == Some(t_min) {
                drain_at(cursor, t_min, &mut samples)?;
            }
        }
        Ok(Some(Batch {
            timestamp: t_min,
            samples,
        }))
    }
}

/// Take samples from `cursor` while its current timestamp equals `ts`.
fn drain_at(cursor: &mut MergeCursor, ts: TimestampMs, out: &mut Vec<Sample>) -> Result<()> {
    while cursor.current_timestamp() == Some(ts) {
        out.push(cursor.take_current()?);
    }
    Ok(())
}
