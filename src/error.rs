//! Error taxonomy for aggregation and the sequences it consumes.
//!
//! Every failure is synchronous: it is returned from the call that hit it and
//! nothing is retried or buffered for later.

use crate::sample::TimestampMs;
use thiserror::Error;

/// Errors raised by sequences, the merger, and aggregators.
#[derive(Error, Debug)]
pub enum AggregateError {
    /// A required argument was absent or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `next_sample` was called after `has_next` reported `false`.
    #[error("sequence exhausted")]
    ExhaustedSequence,

    /// An input went backwards in time while order validation was enabled.
    #[error("input sequence {sequence} out of order: {current} follows {previous}")]
    UnsortedInput {
        sequence: usize,
        previous: TimestampMs,
        current: TimestampMs,
    },

    /// A broken internal invariant. Never expected with correct callers.
    #[error("internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored sample could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Result type alias for aggregation operations.
pub type Result<T> = std::result::Result<T, AggregateError>;

impl AggregateError {
    /// True for failures caused by caller discipline rather than data or I/O.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            AggregateError::InvalidArgument(_) | AggregateError::ExhaustedSequence
        )
    }
}
