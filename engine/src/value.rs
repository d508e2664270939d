//! The typed value model.
//!
//! [`WireValue`] is a closed sum type: adding a variant is a compile-time
//! obligation in every exhaustive match in equality, ordering, hashing, and
//! canonical identity.

use crate::{
    error::{Error, Result},
    numeric, Reference, ServerTimestamp, Timestamp,
};
use serde::{
    de::{self, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use std::collections::BTreeMap;
use std::fmt;

/// Map payload: unique string keys iterated in byte order.
pub type MapValue = BTreeMap<String, WireValue>;

/// Coarse type-ordering class of a value.
///
/// Values of a lower bucket always sort before values of a higher bucket.
/// Integer and Double share [`Bucket::Number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Bucket {
    Null = 0,
    Boolean = 1,
    Number = 2,
    Timestamp = 3,
    ServerTimestamp = 4,
    String = 5,
    Blob = 6,
    Reference = 7,
    GeoPoint = 8,
    Array = 9,
    Map = 10,
}

impl Bucket {
    /// Numeric rank, `0..=10`.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Bucket::Null => "Null",
            Bucket::Boolean => "Boolean",
            Bucket::Number => "Number",
            Bucket::Timestamp => "Timestamp",
            Bucket::ServerTimestamp => "ServerTimestamp",
            Bucket::String => "String",
            Bucket::Blob => "Blob",
            Bucket::Reference => "Reference",
            Bucket::GeoPoint => "GeoPoint",
            Bucket::Array => "Array",
            Bucket::Map => "Map",
        };
        write!(f, "{name}")
    }
}

/// A geographic point. Latitude within `[-90, 90]`, longitude within
/// `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

/// Unvalidated wire form of [`GeoPoint`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = Error;

    fn try_from(raw: RawGeoPoint) -> Result<Self> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        // Range checks also reject NaN.
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidGeoPoint {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A single field value as seen by the comparator.
///
/// `PartialEq`, `Eq` and `Hash` follow [`crate::equals`]: all NaNs are equal,
/// `-0.0` and `0.0` are not, and an `Integer` never equals a `Double`.
/// There is deliberately no `PartialOrd`: [`crate::compare`] may report two
/// unequal values as the same rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WireValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    Timestamp(Timestamp),
    ServerTimestamp(ServerTimestamp),
    /// UTF-8 text, compared byte by byte without normalization.
    String(String),
    Blob(Vec<u8>),
    Reference(Reference),
    GeoPoint(GeoPoint),
    Array(Vec<WireValue>),
    Map(#[serde(deserialize_with = "deserialize_unique_map")] MapValue),
}

// Children are moved onto a heap work stack so that dropping a deeply
// nested value never recurses.
impl Drop for WireValue {
    fn drop(&mut self) {
        let mut pending = match self.take_children() {
            Some(children) => children,
            None => return,
        };
        while let Some(mut value) = pending.pop() {
            if let Some(children) = value.take_children() {
                pending.extend(children);
            }
        }
    }
}

/// Map payload deserializer that rejects duplicate keys instead of keeping
/// the last one.
fn deserialize_unique_map<'de, D>(deserializer: D) -> std::result::Result<MapValue, D::Error>
where
    D: Deserializer<'de>,
{
    struct UniqueMapVisitor;

    impl<'de> Visitor<'de> for UniqueMapVisitor {
        type Value = MapValue;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map with unique string keys")
        }

        fn visit_map<A>(self, mut access: A) -> std::result::Result<MapValue, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut map = MapValue::new();
            while let Some((key, value)) = access.next_entry::<String, WireValue>()? {
                if map.contains_key(&key) {
                    return Err(de::Error::custom(Error::DuplicateMapKey(key)));
                }
                map.insert(key, value);
            }
            Ok(map)
        }
    }

    deserializer.deserialize_map(UniqueMapVisitor)
}

impl WireValue {
    /// Ordering bucket of this value.
    pub fn bucket(&self) -> Bucket {
        match self {
            WireValue::Null => Bucket::Null,
            WireValue::Boolean(_) => Bucket::Boolean,
            WireValue::Integer(_) | WireValue::Double(_) => Bucket::Number,
            WireValue::Timestamp(_) => Bucket::Timestamp,
            WireValue::ServerTimestamp(_) => Bucket::ServerTimestamp,
            WireValue::String(_) => Bucket::String,
            WireValue::Blob(_) => Bucket::Blob,
            WireValue::Reference(_) => Bucket::Reference,
            WireValue::GeoPoint(_) => Bucket::GeoPoint,
            WireValue::Array(_) => Bucket::Array,
            WireValue::Map(_) => Bucket::Map,
        }
    }

    /// Detach the direct children of a composite, leaving it empty.
    fn take_children(&mut self) -> Option<Vec<WireValue>> {
        match self {
            WireValue::Array(values) if !values.is_empty() => Some(std::mem::take(values)),
            WireValue::Map(map) if !map.is_empty() => {
                Some(std::mem::take(map).into_values().collect())
            }
            WireValue::ServerTimestamp(ts) => ts.take_previous_value().map(|previous| vec![previous]),
            _ => None,
        }
    }

    /// A NaN double with the canonical bit pattern.
    pub fn nan() -> Self {
        WireValue::Double(f64::from_bits(numeric::CANONICAL_NAN_BITS))
    }

    /// Build a map from key/value pairs, rejecting duplicate keys.
    pub fn map_from_entries<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, WireValue)>,
        K: Into<String>,
    {
        let mut map = MapValue::new();
        for (key, value) in entries {
            let key = key.into();
            if map.contains_key(&key) {
                return Err(Error::DuplicateMapKey(key));
            }
            map.insert(key, value);
        }
        Ok(WireValue::Map(map))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, WireValue::Null)
    }

    pub fn is_number(&self) -> bool {
        self.bucket() == Bucket::Number
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, WireValue::Integer(_))
    }

    pub fn is_double(&self) -> bool {
        matches!(self, WireValue::Double(_))
    }

    /// True for a `Double` holding any NaN bit pattern.
    pub fn is_nan(&self) -> bool {
        matches!(self, WireValue::Double(d) if d.is_nan())
    }

    pub fn is_array(&self) -> bool {
        matches!(self, WireValue::Array(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, WireValue::Map(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            WireValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            WireValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            WireValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            WireValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_server_timestamp(&self) -> Option<&ServerTimestamp> {
        match self {
            WireValue::ServerTimestamp(ts) => Some(ts),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            WireValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            WireValue::Blob(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            WireValue::Reference(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_geo_point(&self) -> Option<GeoPoint> {
        match self {
            WireValue::GeoPoint(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[WireValue]> {
        match self {
            WireValue::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            WireValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<bool> for WireValue {
    fn from(value: bool) -> Self {
        WireValue::Boolean(value)
    }
}

impl From<i64> for WireValue {
    fn from(value: i64) -> Self {
        WireValue::Integer(value)
    }
}

impl From<i32> for WireValue {
    fn from(value: i32) -> Self {
        WireValue::Integer(value.into())
    }
}

impl From<f64> for WireValue {
    fn from(value: f64) -> Self {
        WireValue::Double(value)
    }
}

impl From<&str> for WireValue {
    fn from(value: &str) -> Self {
        WireValue::String(value.to_string())
    }
}

impl From<String> for WireValue {
    fn from(value: String) -> Self {
        WireValue::String(value)
    }
}

impl From<Timestamp> for WireValue {
    fn from(value: Timestamp) -> Self {
        WireValue::Timestamp(value)
    }
}

impl From<ServerTimestamp> for WireValue {
    fn from(value: ServerTimestamp) -> Self {
        WireValue::ServerTimestamp(value)
    }
}

impl From<Reference> for WireValue {
    fn from(value: Reference) -> Self {
        WireValue::Reference(value)
    }
}

impl From<GeoPoint> for WireValue {
    fn from(value: GeoPoint) -> Self {
        WireValue::GeoPoint(value)
    }
}

impl From<Vec<WireValue>> for WireValue {
    fn from(value: Vec<WireValue>) -> Self {
        WireValue::Array(value)
    }
}

impl From<MapValue> for WireValue {
    fn from(value: MapValue) -> Self {
        WireValue::Map(value)
    }
}
