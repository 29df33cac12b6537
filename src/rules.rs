//! One checking rule per builtin kind.
//!
//! Rules are plain functions over `(input, params, path)`; those that need to
//! recurse also take the [`Checker`](crate::checker::Checker). Families live in
//! submodules:
//! - `scalar`: string, number, integer, boolean, null, undefined, anything, literal, enum
//! - `arr`:    array, tuple
//! - `obj`:    object, dictionary
//! - `set`:    either, restrict, optional, nullable
pub mod scalar;
pub mod arr;
pub mod obj;
pub mod set;

use std::cmp::Ordering;

use ordered_float::OrderedFloat;
use serde_json::{Number, Value};

use crate::error::{CheckResult, Failure};
use crate::path::Path;

pub(crate) fn fail(message: impl Into<String>, path: &Path) -> CheckResult {
    Err(Failure::new(message, path).into())
}

/// Exact between integers, total `f64` order otherwise.
pub fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x.cmp(&y);
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x.cmp(&y);
    }
    let x = OrderedFloat(a.as_f64().unwrap_or(f64::NAN));
    let y = OrderedFloat(b.as_f64().unwrap_or(f64::NAN));
    x.cmp(&y)
}

/// Structural equality where `1` and `1.0` are the same number and member
/// order does not matter.
pub fn deep_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y) == Ordering::Equal,
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_eq(x, y))
        }
        (Value::Object(xm), Value::Object(ym)) => {
            xm.len() == ym.len()
                && xm.iter().all(|(k, x)| ym.get(k).is_some_and(|y| deep_eq(x, y)))
        }
        _ => a == b,
    }
}
