//! Timestamps and pending server timestamps.
//!
//! A [`Timestamp`] is a point in time with nanosecond precision, ordered by
//! seconds and then nanoseconds. A [`ServerTimestamp`] is a placeholder for a
//! time the server has not assigned yet; it carries the local write time it
//! sorts by.

use crate::{
    error::{Error, Result},
    Nanos, Seconds, WireValue,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Earliest supported second: 0001-01-01T00:00:00Z.
pub const MIN_SECONDS: Seconds = -62_135_596_800;

/// Latest supported second: 9999-12-31T23:59:59Z.
pub const MAX_SECONDS: Seconds = 253_402_300_799;

const NANOS_PER_SECOND: Nanos = 1_000_000_000;

/// A point in time, UTC, with nanosecond precision.
///
/// Ordering rules:
/// 1. Lower `seconds` sorts first
/// 2. If seconds are equal, lower `nanos` sorts first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTimestamp")]
pub struct Timestamp {
    seconds: Seconds,
    nanos: Nanos,
}

/// Unvalidated wire form of [`Timestamp`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTimestamp {
    seconds: Seconds,
    nanos: Nanos,
}

impl TryFrom<RawTimestamp> for Timestamp {
    type Error = Error;

    fn try_from(raw: RawTimestamp) -> Result<Self> {
        Self::new(raw.seconds, raw.nanos)
    }
}

impl Timestamp {
    /// Create a timestamp, validating the nanosecond field and the supported
    /// calendar range.
    pub fn new(seconds: Seconds, nanos: Nanos) -> Result<Self> {
        if !(0..NANOS_PER_SECOND).contains(&nanos) || !(MIN_SECONDS..=MAX_SECONDS).contains(&seconds)
        {
            return Err(Error::InvalidTimestamp { seconds, nanos });
        }
        Ok(Self { seconds, nanos })
    }

    /// Seconds since the Unix epoch.
    pub fn seconds(&self) -> Seconds {
        self.seconds
    }

    /// Nanosecond fraction, always in `0..1_000_000_000`.
    pub fn nanos(&self) -> Nanos {
        self.nanos
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.seconds.cmp(&other.seconds) {
            Ordering::Equal => self.nanos.cmp(&other.nanos),
            other => other,
        }
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<DateTime<Utc>> for Timestamp {
    type Error = Error;

    fn try_from(value: DateTime<Utc>) -> Result<Self> {
        // Leap seconds surface as nanos >= 1e9 and are rejected by `new`.
        let nanos = Nanos::try_from(value.timestamp_subsec_nanos()).map_err(|_| {
            Error::InvalidTimestamp {
                seconds: value.timestamp(),
                nanos: Nanos::MAX,
            }
        })?;
        Self::new(value.timestamp(), nanos)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(value: Timestamp) -> Self {
        // Every constructor validates, so nanos are non-negative and the
        // seconds lie well inside chrono's range; the default is unreachable.
        DateTime::from_timestamp(value.seconds, value.nanos as u32).unwrap_or_default()
    }
}

/// A timestamp the server will assign when the pending write commits.
///
/// Two server timestamps compare and test equal by their local write time
/// only. The previous value is kept for display purposes and never
/// participates in comparison, equality, or hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTimestamp {
    local_write_time: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    previous_value: Option<Box<WireValue>>,
}

impl ServerTimestamp {
    /// Create a pending server timestamp written locally at `local_write_time`.
    pub fn new(local_write_time: Timestamp) -> Self {
        Self {
            local_write_time,
            previous_value: None,
        }
    }

    /// Attach the value the field held before the pending write.
    pub fn with_previous_value(mut self, previous: WireValue) -> Self {
        self.previous_value = Some(Box::new(previous));
        self
    }

    pub fn local_write_time(&self) -> Timestamp {
        self.local_write_time
    }

    pub fn previous_value(&self) -> Option<&WireValue> {
        self.previous_value.as_deref()
    }

    pub(crate) fn take_previous_value(&mut self) -> Option<WireValue> {
        self.previous_value.take().map(|previous| *previous)
    }
}

impl PartialEq for ServerTimestamp {
    fn eq(&self, other: &Self) -> bool {
        self.local_write_time == other.local_write_time
    }
}

impl Eq for ServerTimestamp {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rejects_out_of_range_nanos() {
        assert!(Timestamp::new(0, -1).is_err());
        assert!(Timestamp::new(0, 1_000_000_000).is_err());
        assert!(Timestamp::new(0, 999_999_999).is_ok());
    }

    #[test]
    fn rejects_out_of_range_seconds() {
        assert!(Timestamp::new(MIN_SECONDS, 0).is_ok());
        assert!(Timestamp::new(MAX_SECONDS, 999_999_999).is_ok());
        assert_eq!(
            Timestamp::new(MIN_SECONDS - 1, 0),
            Err(Error::InvalidTimestamp {
                seconds: MIN_SECONDS - 1,
                nanos: 0
            })
        );
        assert!(Timestamp::new(MAX_SECONDS + 1, 0).is_err());
    }

    #[test]
    fn ordering_by_seconds_then_nanos() {
        let a = Timestamp::new(10, 500).unwrap();
        let b = Timestamp::new(10, 501).unwrap();
        let c = Timestamp::new(11, 0).unwrap();
        assert!(a < b);
        assert!(b < c);
        assert_eq!(a.cmp(&a), Ordering::Equal);
    }

    #[test]
    fn converts_from_datetime() {
        let date = Utc.with_ymd_and_hms(2016, 5, 20, 10, 20, 0).unwrap();
        let ts = Timestamp::try_from(date).unwrap();
        assert_eq!(ts, Timestamp::new(1_463_739_600, 0).unwrap());

        let back: DateTime<Utc> = ts.into();
        assert_eq!(back, date);
    }

    #[test]
    fn server_timestamp_ignores_previous_value() {
        let ts = Timestamp::new(100, 0).unwrap();
        let plain = ServerTimestamp::new(ts);
        let with_prev = ServerTimestamp::new(ts).with_previous_value(WireValue::Integer(7));
        assert_eq!(plain, with_prev);
        assert_eq!(with_prev.previous_value(), Some(&WireValue::Integer(7)));

        let later = ServerTimestamp::new(Timestamp::new(101, 0).unwrap());
        assert_ne!(plain, later);
    }

    #[test]
    fn serialization_roundtrip() {
        let ts = Timestamp::new(1_477_063_920, 42).unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, r#"{"seconds":1477063920,"nanos":42}"#);
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, parsed);
    }

    #[test]
    fn deserialization_validates() {
        for json in [
            r#"{"seconds":0,"nanos":2000000000}"#,
            r#"{"seconds":0,"nanos":-1}"#,
            r#"{"seconds":253402300800,"nanos":0}"#,
        ] {
            let err = serde_json::from_str::<Timestamp>(json).unwrap_err();
            assert!(err.to_string().contains("invalid timestamp"), "{json}: {err}");
        }

        let server: std::result::Result<ServerTimestamp, _> =
            serde_json::from_str(r#"{"localWriteTime":{"seconds":0,"nanos":-5}}"#);
        assert!(server.is_err());
    }

    #[test]
    fn converts_range_bounds_to_datetime() {
        let min: DateTime<Utc> = Timestamp::new(MIN_SECONDS, 0).unwrap().into();
        assert_eq!(min, Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap());

        let max: DateTime<Utc> = Timestamp::new(MAX_SECONDS, 999_999_999).unwrap().into();
        assert_eq!(max.timestamp(), MAX_SECONDS);
        assert_eq!(max.timestamp_subsec_nanos(), 999_999_999);
    }
}
