//! Cross-representation numeric comparison.
//!
//! Integers and doubles share one ordering bucket and compare by
//! mathematical value, exactly, across the whole `i64` range. NaN has a
//! single fixed position: below every other number.
//!
//! Equality is stricter than ordering. Every NaN payload equals every other
//! NaN, but `-0.0` and `0.0` are distinct even though they rank the same.

use std::cmp::Ordering;

/// Bit pattern every NaN is canonicalized to before equality checks.
pub const CANONICAL_NAN_BITS: u64 = 0x7ff8_0000_0000_0000;

// 2^63 as an exact double: the first double above i64::MAX.
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// Map any NaN payload (quiet, signaling, any mantissa) to the canonical NaN.
pub fn canonicalize(value: f64) -> f64 {
    if value.is_nan() {
        f64::from_bits(CANONICAL_NAN_BITS)
    } else {
        value
    }
}

/// Raw bits after NaN canonicalization. Keeps the sign of zero.
pub fn canonical_bits(value: f64) -> u64 {
    canonicalize(value).to_bits()
}

/// Equality of two doubles: canonical bit equality.
pub fn doubles_equal(left: f64, right: f64) -> bool {
    canonical_bits(left) == canonical_bits(right)
}

pub fn compare_integers(left: i64, right: i64) -> Ordering {
    left.cmp(&right)
}

/// Total order over doubles: NaN first, then numeric order with
/// `-0.0 == 0.0`.
pub fn compare_doubles(left: f64, right: f64) -> Ordering {
    match (left.is_nan(), right.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        // Neither side is NaN, so partial_cmp is always Some.
        (false, false) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
    }
}

/// Compare a double against an integer by exact mathematical value.
pub fn compare_mixed(double: f64, integer: i64) -> Ordering {
    if double.is_nan() {
        return Ordering::Less;
    }
    if double < -TWO_POW_63 {
        return Ordering::Less;
    }
    if double >= TWO_POW_63 {
        return Ordering::Greater;
    }

    // In range, so the cast truncates toward zero without saturating.
    let truncated = double as i64;
    match truncated.cmp(&integer) {
        // Integral parts match; the fractional part decides. `truncated` came
        // from `double`, so converting it back is exact.
        Ordering::Equal => compare_doubles(double, truncated as f64),
        other => other,
    }
}

/// A value from the numeric bucket.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Integer(i64),
    Double(f64),
}

/// Compare two numbers of either representation.
pub fn compare_numbers(left: Number, right: Number) -> Ordering {
    match (left, right) {
        (Number::Integer(a), Number::Integer(b)) => compare_integers(a, b),
        (Number::Double(a), Number::Double(b)) => compare_doubles(a, b),
        (Number::Double(a), Number::Integer(b)) => compare_mixed(a, b),
        (Number::Integer(a), Number::Double(b)) => compare_mixed(b, a).reverse(),
    }
}
