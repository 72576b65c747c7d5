use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliseconds since UNIX epoch (UTC). May be negative.
pub type TimestampMs = i64;

/// The numeric payload of a sample: exactly one of integer or real.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    Integer(i64),
    Real(f64),
}

impl Value {
    #[inline]
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    #[inline]
    pub fn is_real(&self) -> bool {
        matches!(self, Value::Real(_))
    }

    /// The value as `i64`. Reals are truncated toward zero.
    #[inline]
    pub fn as_i64(&self) -> i64 {
        match *self {
            Value::Integer(v) => v,
            Value::Real(v) => v as i64,
        }
    }

    /// The value as `f64`. Integers are converted (lossy above 2^53).
    #[inline]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Value::Integer(v) => v as f64,
            Value::Real(v) => v,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{v:?}"),
        }
    }
}

/// One observation of a time series.
///
/// Samples are `Copy` and expose no setters; once built they never change.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    timestamp: TimestampMs,
    value: Value,
}

impl Sample {
    #[inline]
    pub fn new(timestamp: TimestampMs, value: Value) -> Self {
        Self { timestamp, value }
    }

    #[inline]
    pub fn integer(timestamp: TimestampMs, value: i64) -> Self {
        Self::new(timestamp, Value::Integer(value))
    }

    #[inline]
    pub fn real(timestamp: TimestampMs, value: f64) -> Self {
        Self::new(timestamp, Value::Real(value))
    }

    #[inline]
    pub fn timestamp(&self) -> TimestampMs {
        self.timestamp
    }

    #[inline]
    pub fn value(&self) -> Value {
        self.value
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        self.value.is_integer()
    }

    #[inline]
    pub fn as_i64(&self) -> i64 {
        self.value.as_i64()
    }

    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.value.as_f64()
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.timestamp, self.value)
    }
}
