//! Total-order comparison of values.
//!
//! # Algorithm
//!
//! 1. Different buckets order by bucket rank
//! 2. Numbers compare by mathematical value, NaN lowest
//! 3. Timestamps by seconds then nanos; server timestamps by local write time
//! 4. Strings and blobs byte-wise; references by database then path
//! 5. Geo points by latitude then longitude
//! 6. Arrays element-wise, a strict prefix sorts first
//! 7. Maps by sorted key sequence, then by values in key order
//!
//! `Ordering::Equal` means "same rank", which is weaker than
//! [`crate::equals`].

use crate::{
    numeric::{self, Number},
    WireValue,
};
use std::cmp::Ordering;

/// A unit of pending comparison work.
enum Frame<'a> {
    /// Two values still to be compared.
    Pair(&'a WireValue, &'a WireValue),
    /// A tie-break decided up front, consulted once everything above it on
    /// the stack compared `Equal`.
    Settled(Ordering),
}

/// Compare two values under the total order.
///
/// Pure and total. Composites are walked with an explicit work stack.
pub fn compare(left: &WireValue, right: &WireValue) -> Ordering {
    let mut pending = vec![Frame::Pair(left, right)];

    while let Some(frame) = pending.pop() {
        let ordering = match frame {
            Frame::Pair(left, right) => shallow_compare(left, right, &mut pending),
            Frame::Settled(ordering) => ordering,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}

/// Stable sort of `values` by [`compare`].
pub fn sort_values(values: &mut [WireValue]) {
    values.sort_by(compare);
}

/// Smallest value by [`compare`]; the first one wins among equal ranks.
pub fn min_value(values: &[WireValue]) -> Option<&WireValue> {
    values
        .iter()
        .reduce(|min, value| if compare(value, min).is_lt() { value } else { min })
}

/// Largest value by [`compare`]; the first one wins among equal ranks.
pub fn max_value(values: &[WireValue]) -> Option<&WireValue> {
    values
        .iter()
        .reduce(|max, value| if compare(value, max).is_gt() { value } else { max })
}

impl WireValue {
    /// Method form of [`compare`].
    pub fn compare(&self, other: &WireValue) -> Ordering {
        compare(self, other)
    }
}

// Compare one level. Composites push their children (and a tie-break) onto
// `pending` and report `Equal` for now.
fn shallow_compare<'a>(
    left: &'a WireValue,
    right: &'a WireValue,
    pending: &mut Vec<Frame<'a>>,
) -> Ordering {
    match (left, right) {
        (WireValue::Null, WireValue::Null) => Ordering::Equal,
        (WireValue::Boolean(a), WireValue::Boolean(b)) => a.cmp(b),
        (WireValue::Integer(a), WireValue::Integer(b)) => numeric::compare_integers(*a, *b),
        (WireValue::Double(a), WireValue::Double(b)) => numeric::compare_doubles(*a, *b),
        (WireValue::Integer(a), WireValue::Double(b)) => {
            numeric::compare_numbers(Number::Integer(*a), Number::Double(*b))
        }
        (WireValue::Double(a), WireValue::Integer(b)) => {
            numeric::compare_numbers(Number::Double(*a), Number::Integer(*b))
        }
        (WireValue::Timestamp(a), WireValue::Timestamp(b)) => a.cmp(b),
        (WireValue::ServerTimestamp(a), WireValue::ServerTimestamp(b)) => {
            a.local_write_time().cmp(&b.local_write_time())
        }
        (WireValue::String(a), WireValue::String(b)) => a.as_bytes().cmp(b.as_bytes()),
        (WireValue::Blob(a), WireValue::Blob(b)) => a.cmp(b),
        (WireValue::Reference(a), WireValue::Reference(b)) => a.cmp(b),
        (WireValue::GeoPoint(a), WireValue::GeoPoint(b)) => {
            match numeric::compare_doubles(a.latitude(), b.latitude()) {
                Ordering::Equal => numeric::compare_doubles(a.longitude(), b.longitude()),
                other => other,
            }
        }
        (WireValue::Array(a), WireValue::Array(b)) => {
            // Length only matters once every shared position ties.
            pending.push(Frame::Settled(a.len().cmp(&b.len())));
            pending.extend(
                a.iter()
                    .zip(b.iter())
                    .rev()
                    .map(|(left, right)| Frame::Pair(left, right)),
            );
            Ordering::Equal
        }
        (WireValue::Map(a), WireValue::Map(b)) => {
            let keys = a.keys().map(String::as_bytes).cmp(b.keys().map(String::as_bytes));
            if keys != Ordering::Equal {
                return keys;
            }
            pending.extend(
                a.values()
                    .zip(b.values())
                    .rev()
                    .map(|(left, right)| Frame::Pair(left, right)),
            );
            Ordering::Equal
        }
        _ => left.bucket().cmp(&right.bucket()),
    }
}
