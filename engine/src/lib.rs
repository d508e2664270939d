//! # docvalue Engine
//!
//! Value comparison and canonicalization for document database clients.
//!
//! Every subsystem that sorts documents, evaluates range filters, dedupes
//! writes, or builds index keys relies on the primitives in this crate
//! being exactly right, including for NaN, signed zero, mixed integer and
//! double comparison, and byte-wise string ordering.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine knows nothing of files, network, or persistence
//! - **Total**: every comparison of well-formed values has an answer
//! - **Pure**: no shared mutable state, safe to call from any thread
//! - **Stack-safe**: composites are walked iteratively, not recursively
//!
//! ## Core Concepts
//!
//! ### Values
//!
//! A [`WireValue`] is a closed tagged union. Each variant belongs to an
//! ordering [`Bucket`]:
//!
//! `Null < Boolean < Number < Timestamp < ServerTimestamp < String < Blob
//! < Reference < GeoPoint < Array < Map`
//!
//! Integers and doubles share the number bucket.
//!
//! ### Equality vs. ordering
//!
//! - [`equals`] is structural and type-sensitive: `Integer(1)` is not
//!   `Double(1.0)`, `-0.0` is not `0.0`, but every NaN equals every NaN.
//! - [`compare`] is a total order: `Integer(1)` and `Double(1.0)` rank the
//!   same, as do `-0.0` and `0.0`. NaN sorts below every other number.
//!
//! ### Canonical identity
//!
//! [`canonical_id`] renders a deterministic string that is equal for two
//! values exactly when they are [`equals`]-equal. The scheme is pluggable
//! through [`IdentityEncoder`].
//!
//! ## Quick Start
//!
//! ```rust
//! use docvalue_engine::{compare, equals, Encoder, JsonEncoder, WireValue};
//! use serde_json::json;
//! use std::cmp::Ordering;
//!
//! let encoder = JsonEncoder::default();
//! let a = encoder.encode(&json!({"bar": 1, "foo": 2})).unwrap();
//! let b = encoder.encode(&json!({"foo": 2, "bar": 1})).unwrap();
//! assert!(equals(&a, &b));
//!
//! let one = WireValue::Integer(1);
//! let one_point_oh = WireValue::Double(1.0);
//! assert_eq!(compare(&one, &one_point_oh), Ordering::Equal);
//! assert!(!equals(&one, &one_point_oh));
//! ```

pub mod canonical;
pub mod encode;
pub mod equality;
pub mod error;
pub mod numeric;
pub mod ordering;
pub mod path;
pub mod sentinel;
pub mod timestamp;
pub mod value;

// Re-export main types at crate root
pub use canonical::{canonical_id, IdentityEncoder, TaggedIdentity};
pub use encode::{Encoder, EncoderConfig, IntegerOverflow, JsonEncoder};
pub use equality::{array_contains, equals};
pub use error::Error;
pub use ordering::{compare, max_value, min_value, sort_values};
pub use path::{DatabaseId, DocumentPath, Reference, DEFAULT_DATABASE_ID};
pub use sentinel::decode_sentinels;
pub use timestamp::{ServerTimestamp, Timestamp};
pub use value::{Bucket, GeoPoint, MapValue, WireValue};

/// Type aliases for clarity
pub type Seconds = i64;
pub type Nanos = i32;
