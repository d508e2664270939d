//! Structural, type-sensitive equality.
//!
//! # Algorithm
//!
//! 1. Different variants are never equal (Integer and Double included)
//! 2. Scalars compare by payload; doubles by canonical bits
//! 3. Arrays must match in length and element-wise, in order
//! 4. Maps must have the same key set and equal values per key
//!
//! Composites are walked with an explicit work stack, so nesting depth is
//! bounded by heap, not call stack.

use crate::{numeric, GeoPoint, WireValue};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Returns true if `left` and `right` are the same value.
///
/// Reflexive, symmetric, and transitive. Note that `equals` is stricter than
/// [`crate::compare`] reporting `Equal`: `Integer(1)` vs `Double(1.0)` and
/// `-0.0` vs `0.0` rank the same but are not equal.
pub fn equals(left: &WireValue, right: &WireValue) -> bool {
    let mut pending = vec![(left, right)];

    while let Some((left, right)) = pending.pop() {
        if !shallow_equals(left, right, &mut pending) {
            return false;
        }
    }

    true
}

/// Returns true if any element of `values` equals `needle`.
pub fn array_contains(values: &[WireValue], needle: &WireValue) -> bool {
    values.iter().any(|value| equals(value, needle))
}

// Compare one level; child pairs still to check are queued on `pending`.
fn shallow_equals<'a>(
    left: &'a WireValue,
    right: &'a WireValue,
    pending: &mut Vec<(&'a WireValue, &'a WireValue)>,
) -> bool {
    match (left, right) {
        (WireValue::Null, WireValue::Null) => true,
        (WireValue::Boolean(a), WireValue::Boolean(b)) => a == b,
        (WireValue::Integer(a), WireValue::Integer(b)) => a == b,
        (WireValue::Double(a), WireValue::Double(b)) => numeric::doubles_equal(*a, *b),
        (WireValue::Timestamp(a), WireValue::Timestamp(b)) => a == b,
        (WireValue::ServerTimestamp(a), WireValue::ServerTimestamp(b)) => {
            a.local_write_time() == b.local_write_time()
        }
        (WireValue::String(a), WireValue::String(b)) => a.as_bytes() == b.as_bytes(),
        (WireValue::Blob(a), WireValue::Blob(b)) => a == b,
        (WireValue::Reference(a), WireValue::Reference(b)) => a == b,
        (WireValue::GeoPoint(a), WireValue::GeoPoint(b)) => geo_points_equal(a, b),
        (WireValue::Array(a), WireValue::Array(b)) => {
            if a.len() != b.len() {
                return false;
            }
            pending.extend(a.iter().zip(b.iter()));
            true
        }
        (WireValue::Map(a), WireValue::Map(b)) => {
            if a.len() != b.len() {
                return false;
            }
            // Both maps iterate in key order, so equal key sets line up.
            for ((key_a, value_a), (key_b, value_b)) in a.iter().zip(b.iter()) {
                if key_a != key_b {
                    return false;
                }
                pending.push((value_a, value_b));
            }
            true
        }
        _ => false,
    }
}

// Coordinates compare numerically; -0.0 and 0.0 name the same place.
fn geo_points_equal(a: &GeoPoint, b: &GeoPoint) -> bool {
    numeric::compare_doubles(a.latitude(), b.latitude()) == Ordering::Equal
        && numeric::compare_doubles(a.longitude(), b.longitude()) == Ordering::Equal
}

fn coordinate_bits(value: f64) -> u64 {
    if value == 0.0 {
        0
    } else {
        numeric::canonical_bits(value)
    }
}

impl PartialEq for WireValue {
    fn eq(&self, other: &Self) -> bool {
        equals(self, other)
    }
}

impl Eq for WireValue {}

impl Hash for WireValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut pending = vec![self];

        while let Some(value) = pending.pop() {
            std::mem::discriminant(value).hash(state);
            match value {
                WireValue::Null => {}
                WireValue::Boolean(b) => b.hash(state),
                WireValue::Integer(i) => i.hash(state),
                WireValue::Double(d) => numeric::canonical_bits(*d).hash(state),
                WireValue::Timestamp(ts) => ts.hash(state),
                WireValue::ServerTimestamp(ts) => ts.local_write_time().hash(state),
                WireValue::String(s) => s.hash(state),
                WireValue::Blob(bytes) => bytes.hash(state),
                WireValue::Reference(r) => r.hash(state),
                WireValue::GeoPoint(p) => {
                    coordinate_bits(p.latitude()).hash(state);
                    coordinate_bits(p.longitude()).hash(state);
                }
                WireValue::Array(values) => {
                    values.len().hash(state);
                    pending.extend(values.iter().rev());
                }
                WireValue::Map(map) => {
                    map.len().hash(state);
                    for key in map.keys() {
                        key.hash(state);
                    }
                    pending.extend(map.values().rev());
                }
            }
        }
    }
}
