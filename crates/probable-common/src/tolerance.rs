//! Tolerant comparison of bounded-precision scalars
//!
//! Probabilities produced by chained arithmetic accumulate rounding error.
//! All values live in [0, 1], so a fixed absolute threshold is enough to
//! absorb that error; every equality and ordering check on a probability
//! goes through [`compare`].

use std::cmp::Ordering;

/// Default threshold for absorbing rounding errors
pub const DEFAULT_ROUNDING_THRESHOLD: f64 = 1e-8;

/// Compare two scalars under [`DEFAULT_ROUNDING_THRESHOLD`]
#[inline]
pub fn compare(first: f64, second: f64) -> Ordering {
    compare_with_threshold(first, second, DEFAULT_ROUNDING_THRESHOLD)
}

/// Compare two scalars under an explicit absolute threshold
///
/// Exact equality short-circuits, then `|first - second| <= threshold`
/// counts as equal, otherwise the native ordering decides. A NaN operand
/// never satisfies either equality check and falls through to `Less`.
/// Antisymmetry and transitivity therefore only hold for non-NaN operands:
/// `compare(NaN, NaN)` is `Less` in both directions.
pub fn compare_with_threshold(first: f64, second: f64, threshold: f64) -> Ordering {
    if first == second {
        return Ordering::Equal;
    }
    if (first - second).abs() <= threshold {
        return Ordering::Equal;
    }
    if first > second {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

/// Tolerant equality under [`DEFAULT_ROUNDING_THRESHOLD`]
#[inline]
pub fn approx_eq(first: f64, second: f64) -> bool {
    compare(first, second) == Ordering::Equal
}
