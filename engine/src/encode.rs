//! Encoding typed field values into [`WireValue`]s.
//!
//! [`Encoder`] is the boundary the comparator consumes. [`JsonEncoder`] is
//! the implementation for plain JSON documents: JSON carries no timestamps,
//! references, geo points, or blobs, so only the remaining variants are
//! produced.

use crate::{
    error::{Error, Result},
    MapValue, WireValue,
};
use serde::{Deserialize, Serialize};

/// Nesting limit for arrays and maps within one document.
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// Encodes an input representation into a comparator-ready value.
pub trait Encoder<T: ?Sized> {
    fn encode(&self, input: &T) -> Result<WireValue>;
}

/// What to do with unsigned integers above `i64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntegerOverflow {
    /// Fail with [`Error::IntegerOutOfRange`] (default)
    #[default]
    Reject,
    /// Store as the nearest double (loses precision)
    Double,
}

/// Encoder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncoderConfig {
    /// Handling of integers that do not fit `i64`
    pub integer_overflow: IntegerOverflow,
    /// Deepest allowed array/map nesting; the top-level value is depth 0
    pub max_depth: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            integer_overflow: IntegerOverflow::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EncoderConfig {
    pub fn with_integer_overflow(mut self, policy: IntegerOverflow) -> Self {
        self.integer_overflow = policy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Encodes `serde_json::Value` documents.
#[derive(Debug, Clone, Default)]
pub struct JsonEncoder {
    config: EncoderConfig,
}

impl JsonEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    fn encode_number(&self, number: &serde_json::Number) -> Result<WireValue> {
        if let Some(i) = number.as_i64() {
            return Ok(WireValue::Integer(i));
        }
        if let Some(u) = number.as_u64() {
            return match self.config.integer_overflow {
                IntegerOverflow::Reject => {
                    tracing::debug!(value = u, "rejecting integer above i64::MAX");
                    Err(Error::IntegerOutOfRange(u))
                }
                IntegerOverflow::Double => {
                    tracing::trace!(value = u, "widening integer to double");
                    Ok(WireValue::Double(u as f64))
                }
            };
        }
        // Only reachable with serde_json's arbitrary_precision feature.
        number.as_f64().map(WireValue::Double).ok_or_else(|| {
            tracing::debug!(%number, "rejecting number outside f64");
            Error::UnrepresentableNumber(number.to_string())
        })
    }

    fn encode_at(&self, input: &serde_json::Value, depth: usize) -> Result<WireValue> {
        match input {
            serde_json::Value::Null => Ok(WireValue::Null),
            serde_json::Value::Bool(b) => Ok(WireValue::Boolean(*b)),
            serde_json::Value::Number(n) => self.encode_number(n),
            serde_json::Value::String(s) => Ok(WireValue::String(s.clone())),
            serde_json::Value::Array(values) => {
                self.check_depth(depth + 1)?;
                values
                    .iter()
                    .map(|value| self.encode_at(value, depth + 1))
                    .collect::<Result<Vec<_>>>()
                    .map(WireValue::Array)
            }
            serde_json::Value::Object(object) => {
                self.check_depth(depth + 1)?;
                object
                    .iter()
                    .map(|(key, value)| Ok((key.clone(), self.encode_at(value, depth + 1)?)))
                    .collect::<Result<MapValue>>()
                    .map(WireValue::Map)
            }
        }
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.config.max_depth {
            tracing::debug!(depth, max_depth = self.config.max_depth, "document nested too deeply");
            return Err(Error::NestingTooDeep(self.config.max_depth));
        }
        Ok(())
    }
}

impl Encoder<serde_json::Value> for JsonEncoder {
    fn encode(&self, input: &serde_json::Value) -> Result<WireValue> {
        self.encode_at(input, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{canonical_id, equals};
    use serde_json::json;

    #[test]
    fn encodes_scalars() {
        let encoder = JsonEncoder::default();
        assert_eq!(encoder.encode(&json!(null)).unwrap(), WireValue::Null);
        assert_eq!(encoder.encode(&json!(true)).unwrap(), WireValue::Boolean(true));
        assert_eq!(encoder.encode(&json!(-3)).unwrap(), WireValue::Integer(-3));
        assert_eq!(encoder.encode(&json!(1.5)).unwrap(), WireValue::Double(1.5));
        assert_eq!(encoder.encode(&json!("hi")).unwrap(), WireValue::from("hi"));
    }

    #[test]
    fn integers_and_doubles_stay_distinct() {
        let encoder = JsonEncoder::default();
        let int = encoder.encode(&json!(1)).unwrap();
        let double = encoder.encode(&json!(1.0)).unwrap();
        assert!(int.is_integer());
        assert!(double.is_double());
        assert!(!equals(&int, &double));
    }

    #[test]
    fn encodes_documents_independent_of_key_order() {
        let encoder = JsonEncoder::default();
        let a = encoder.encode(&json!({"bar": 1, "foo": [2, "x"]})).unwrap();
        let b = encoder.encode(&json!({"foo": [2, "x"], "bar": 1})).unwrap();
        assert_eq!(a, b);
        assert_eq!(canonical_id(&a), r#"10{"bar":02int(1),"foo":09[02int(2),05"x"]}"#);
    }

    #[test]
    fn integer_overflow_policy() {
        let big = json!(u64::MAX);

        let strict = JsonEncoder::default();
        assert_eq!(
            strict.encode(&big),
            Err(Error::IntegerOutOfRange(u64::MAX))
        );

        let lenient = JsonEncoder::new(
            EncoderConfig::default().with_integer_overflow(IntegerOverflow::Double),
        );
        assert_eq!(
            lenient.encode(&big).unwrap(),
            WireValue::Double(u64::MAX as f64)
        );
    }

    #[test]
    fn number_boundaries() {
        let encoder = JsonEncoder::default();
        assert_eq!(
            encoder.encode(&json!(i64::MIN)).unwrap(),
            WireValue::Integer(i64::MIN)
        );
        assert_eq!(
            encoder.encode(&json!(i64::MAX)).unwrap(),
            WireValue::Integer(i64::MAX)
        );
        assert_eq!(
            encoder.encode(&json!(i64::MAX as u64 + 1)),
            Err(Error::IntegerOutOfRange(i64::MAX as u64 + 1))
        );
        assert_eq!(
            encoder.encode(&json!(f64::MAX)).unwrap(),
            WireValue::Double(f64::MAX)
        );
    }

    #[test]
    fn nesting_limit() {
        let encoder = JsonEncoder::new(EncoderConfig::default().with_max_depth(2));
        assert!(encoder.encode(&json!({"a": [1]})).is_ok());
        assert_eq!(
            encoder.encode(&json!({"a": [[1]]})),
            Err(Error::NestingTooDeep(2))
        );
        assert_eq!(
            encoder.encode(&json!([[{}]])),
            Err(Error::NestingTooDeep(2))
        );

        let flat = JsonEncoder::new(EncoderConfig::default().with_max_depth(0));
        assert!(flat.encode(&json!(1)).is_ok());
        assert!(flat.encode(&json!([])).is_err());
    }

    #[test]
    fn config_defaults_and_serialization() {
        let config = EncoderConfig::default();
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.integer_overflow, IntegerOverflow::Reject);

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"integerOverflow":"reject","maxDepth":20}"#);
        let parsed: EncoderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
