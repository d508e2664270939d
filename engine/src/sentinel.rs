//! Server-timestamp sentinel maps.
//!
//! On the wire a pending server timestamp travels as an ordinary map:
//!
//! ```text
//! { "__type__": "server_timestamp",
//!   "__local_write_time__": <timestamp>,
//!   "__previous_value__": <value> }        // optional
//! ```
//!
//! This module converts between that form and
//! [`WireValue::ServerTimestamp`], so comparisons see the dedicated variant
//! and its ordering bucket.

use crate::{
    error::{Error, Result},
    MapValue, ServerTimestamp, WireValue,
};

pub const TYPE_KEY: &str = "__type__";
pub const SERVER_TIMESTAMP_TYPE: &str = "server_timestamp";
pub const LOCAL_WRITE_TIME_KEY: &str = "__local_write_time__";
pub const PREVIOUS_VALUE_KEY: &str = "__previous_value__";

/// True if `map` carries the server-timestamp type marker.
pub fn is_server_timestamp_sentinel(map: &MapValue) -> bool {
    matches!(map.get(TYPE_KEY), Some(WireValue::String(t)) if t == SERVER_TIMESTAMP_TYPE)
}

impl ServerTimestamp {
    /// Encode as a sentinel map.
    pub fn to_sentinel(&self) -> WireValue {
        let mut map = MapValue::new();
        map.insert(
            TYPE_KEY.to_string(),
            WireValue::String(SERVER_TIMESTAMP_TYPE.to_string()),
        );
        map.insert(
            LOCAL_WRITE_TIME_KEY.to_string(),
            WireValue::Timestamp(self.local_write_time()),
        );
        if let Some(previous) = self.previous_value() {
            map.insert(PREVIOUS_VALUE_KEY.to_string(), previous.clone());
        }
        WireValue::Map(map)
    }

    /// Decode a sentinel map.
    ///
    /// Returns `Ok(None)` for maps without the type marker, and an error when
    /// the marker is present but the local write time is missing or not a
    /// timestamp.
    pub fn from_sentinel(map: &MapValue) -> Result<Option<Self>> {
        if !is_server_timestamp_sentinel(map) {
            return Ok(None);
        }

        let local_write_time = match map.get(LOCAL_WRITE_TIME_KEY) {
            Some(WireValue::Timestamp(ts)) => *ts,
            Some(other) => {
                tracing::debug!(bucket = %other.bucket(), "server timestamp with non-timestamp write time");
                return Err(Error::MalformedServerTimestamp(format!(
                    "{LOCAL_WRITE_TIME_KEY} must be a timestamp, got {}",
                    other.bucket()
                )));
            }
            None => {
                tracing::debug!("server timestamp without local write time");
                return Err(Error::MalformedServerTimestamp(format!(
                    "missing {LOCAL_WRITE_TIME_KEY}"
                )));
            }
        };

        let mut sentinel = ServerTimestamp::new(local_write_time);
        if let Some(previous) = map.get(PREVIOUS_VALUE_KEY) {
            let mut previous = previous.clone();
            decode_sentinels(&mut previous)?;
            sentinel = sentinel.with_previous_value(previous);
        }
        Ok(Some(sentinel))
    }
}

/// Rewrite every sentinel map inside `value` into a
/// [`WireValue::ServerTimestamp`], in place.
pub fn decode_sentinels(value: &mut WireValue) -> Result<()> {
    let mut pending = vec![value];

    while let Some(value) = pending.pop() {
        let decoded = match &*value {
            WireValue::Map(map) => ServerTimestamp::from_sentinel(map)?,
            _ => None,
        };
        if let Some(server_timestamp) = decoded {
            tracing::trace!(
                seconds = server_timestamp.local_write_time().seconds(),
                "decoded server timestamp sentinel"
            );
            *value = WireValue::ServerTimestamp(server_timestamp);
            continue;
        }

        match value {
            WireValue::Array(values) => pending.extend(values.iter_mut()),
            WireValue::Map(map) => pending.extend(map.values_mut()),
            _ => {}
        }
    }

    Ok(())
}
