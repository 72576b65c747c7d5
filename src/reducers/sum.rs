//! Summation with type promotion.

use crate::reducers::Reducer;
use crate::sample::Value;

/// Sum of every value in a batch.
///
/// - All integers: exact `i64` sum, wrapping on overflow.
/// - Any real: the result is real; integers are converted to `f64` as they
///   meet the running real total.
/// - A single value passes through untouched.
///
/// - Accumulator: `Option<Value>`
/// - Output: `Value`
#[derive(Clone, Copy, Debug, Default)]
pub struct Sum;

impl Sum {
    /// Convenience constructor (same as `Default`).
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for Sum {
    type Acc = Option<Value>;

    fn create(&self) -> Option<Value> {
        None
    }

    fn add_input(&self, acc: &mut Option<Value>, v: Value) {
        *acc = Some(match acc.take() {
            None => v,
            Some(cur) => add(cur, v),
        });
    }

    fn finish(&self, acc: Option<Value>) -> Option<Value> {
        acc
    }
}

#[inline]
fn add(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => Value::Integer(x.wrapping_add(y)),
        (Value::Integer(x), Value::Real(y)) => Value::Real(x as f64 + y),
        (Value::Real(x), Value::Integer(y)) => Value::Real(x + y as f64),
        (Value::Real(x), Value::Real(y)) => Value::Real(x + y),
    }
}
