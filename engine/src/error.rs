//! Error types for the docvalue engine.
//!
//! Comparison, equality and canonical identity are total and never fail.
//! Errors only arise while *constructing* values from untrusted input.

use thiserror::Error;

/// All possible errors from the docvalue engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    // Scalar construction errors
    #[error("invalid timestamp: seconds={seconds}, nanos={nanos}")]
    InvalidTimestamp { seconds: i64, nanos: i32 },

    #[error("invalid geo point: latitude={latitude}, longitude={longitude}")]
    InvalidGeoPoint { latitude: f64, longitude: f64 },

    #[error("integer out of range: {0}")]
    IntegerOutOfRange(u64),

    #[error("number not representable as integer or double: {0}")]
    UnrepresentableNumber(String),

    // Reference errors
    #[error("invalid database id: {0}")]
    InvalidDatabaseId(String),

    #[error("invalid document path: {0}")]
    InvalidPath(String),

    #[error("invalid resource name: {0}")]
    InvalidResourceName(String),

    // Composite errors
    #[error("duplicate map key: {0}")]
    DuplicateMapKey(String),

    #[error("nesting depth exceeds limit of {0}")]
    NestingTooDeep(usize),

    #[error("malformed server timestamp: {0}")]
    MalformedServerTimestamp(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
