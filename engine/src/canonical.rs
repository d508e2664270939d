//! Canonical identity strings for index keys and query cursors.
//!
//! The identity scheme is pluggable through [`IdentityEncoder`]; the index
//! builder is expected to provide its own when its key encoding diverges.
//! [`TaggedIdentity`] is the default.
//!
//! # Tagged format
//!
//! Every value renders as a two-digit bucket tag followed by a body:
//!
//! | Variant         | Body                                    |
//! |-----------------|-----------------------------------------|
//! | Null            | `null`                                  |
//! | Boolean         | `true` / `false`                        |
//! | Integer         | `int(42)`                               |
//! | Double          | `double(1.0)`, `double(-0.0)`, `double(NaN)` |
//! | Timestamp       | `time(seconds,nanos)`                   |
//! | ServerTimestamp | `server(seconds,nanos)`                 |
//! | String          | Rust-escaped, double-quoted             |
//! | Blob            | `blob(` lowercase hex `)`               |
//! | Reference       | `ref("project","database","seg"/"seg")` |
//! | GeoPoint        | `geo(lat,lng)`                          |
//! | Array           | `[` elements joined by `,` `]`          |
//! | Map             | `{` `"key":value` joined by `,` `}`     |
//!
//! Two values share an identity exactly when [`crate::equals`] holds, and
//! identities of different buckets sort in bucket order.
//!
//! Within a bucket the strings do **not** follow [`crate::compare`]:
//! `02int(10)` sorts before `02int(9)`. Use identities for equality lookups
//! and dedupe only, never for range ordering.

use crate::{numeric, WireValue};
use std::fmt::Write;

/// Produces a deterministic string identity for a value.
pub trait IdentityEncoder {
    fn canonical_id(&self, value: &WireValue) -> String;
}

/// Default identity scheme: bucket-tagged, type-discriminated text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaggedIdentity;

/// Pieces of output still to be written, innermost last.
enum Token<'a> {
    Value(&'a WireValue),
    Key(&'a str),
    Literal(&'static str),
}

impl IdentityEncoder for TaggedIdentity {
    fn canonical_id(&self, value: &WireValue) -> String {
        let mut out = String::new();
        let mut pending = vec![Token::Value(value)];

        while let Some(token) = pending.pop() {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Key(key) => {
                    let _ = write!(out, "{key:?}:");
                }
                Token::Value(value) => write_value(&mut out, value, &mut pending),
            }
        }

        out
    }
}

/// Identity under the default [`TaggedIdentity`] scheme.
pub fn canonical_id(value: &WireValue) -> String {
    TaggedIdentity.canonical_id(value)
}

impl WireValue {
    /// Method form of [`canonical_id`].
    pub fn canonical_id(&self) -> String {
        canonical_id(self)
    }
}

// Writing into a String cannot fail, so fmt results are discarded.
fn write_value<'a>(out: &mut String, value: &'a WireValue, pending: &mut Vec<Token<'a>>) {
    let _ = write!(out, "{:02}", value.bucket().as_u8());

    match value {
        WireValue::Null => out.push_str("null"),
        WireValue::Boolean(b) => {
            let _ = write!(out, "{b}");
        }
        WireValue::Integer(i) => {
            let _ = write!(out, "int({i})");
        }
        WireValue::Double(d) => {
            let _ = write!(out, "double({:?})", numeric::canonicalize(*d));
        }
        WireValue::Timestamp(ts) => {
            let _ = write!(out, "time({},{})", ts.seconds(), ts.nanos());
        }
        WireValue::ServerTimestamp(ts) => {
            let local = ts.local_write_time();
            let _ = write!(out, "server({},{})", local.seconds(), local.nanos());
        }
        WireValue::String(s) => {
            let _ = write!(out, "{s:?}");
        }
        WireValue::Blob(bytes) => {
            out.push_str("blob(");
            for byte in bytes {
                let _ = write!(out, "{byte:02x}");
            }
            out.push(')');
        }
        WireValue::Reference(r) => {
            let database = r.database();
            let _ = write!(
                out,
                "ref({:?},{:?},",
                database.project_id(),
                database.database_id()
            );
            for (i, segment) in r.path().segments().iter().enumerate() {
                if i > 0 {
                    out.push('/');
                }
                let _ = write!(out, "{segment:?}");
            }
            out.push(')');
        }
        WireValue::GeoPoint(p) => {
            let _ = write!(
                out,
                "geo({:?},{:?})",
                unsigned_zero(p.latitude()),
                unsigned_zero(p.longitude())
            );
        }
        WireValue::Array(values) => {
            out.push('[');
            pending.push(Token::Literal("]"));
            for (i, element) in values.iter().enumerate().rev() {
                pending.push(Token::Value(element));
                if i > 0 {
                    pending.push(Token::Literal(","));
                }
            }
        }
        WireValue::Map(map) => {
            out.push('{');
            pending.push(Token::Literal("}"));
            for (i, (key, element)) in map.iter().enumerate().rev() {
                pending.push(Token::Value(element));
                pending.push(Token::Key(key));
                if i > 0 {
                    pending.push(Token::Literal(","));
                }
            }
        }
    }
}

// Geo coordinates are equal across signed zero, so their identity must be too.
fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
