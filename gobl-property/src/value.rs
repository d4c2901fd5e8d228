//! The payload sum type: one variant per non-undefined [`PropertyType`].

use crate::kind::PropertyType;
use crate::text;
use chrono::{DateTime, Datelike, FixedOffset, TimeDelta, TimeZone};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer, ser};

/// A property payload in its exact representation.
///
/// The variant *is* the type: a `Value::Int16` always holds an `i16`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean.
    Bool(bool),
    /// Platform-width signed integer.
    Int(isize),
    /// 8-bit signed integer.
    Int8(i8),
    /// 16-bit signed integer.
    Int16(i16),
    /// 32-bit signed integer.
    Int32(i32),
    /// 64-bit signed integer.
    Int64(i64),
    /// Platform-width unsigned integer.
    Uint(usize),
    /// 8-bit unsigned integer.
    Uint8(u8),
    /// 16-bit unsigned integer.
    Uint16(u16),
    /// 32-bit unsigned integer.
    Uint32(u32),
    /// 64-bit unsigned integer.
    Uint64(u64),
    /// 32-bit float.
    Float32(f32),
    /// 64-bit float.
    Float64(f64),
    /// Raw bytes.
    ByteArray(Vec<u8>),
    /// Text.
    String(String),
    /// Time instant with its original offset.
    DateTime(DateTime<FixedOffset>),
    /// Signed time span.
    Duration(TimeDelta),
    /// Arbitrary-precision decimal.
    Decimal(Decimal),
    /// Untyped dynamic value.
    Interface(serde_json::Value),
    /// Array of booleans.
    BoolArray(Vec<bool>),
    /// Array of platform-width signed integers.
    IntArray(Vec<isize>),
    /// Array of 8-bit signed integers.
    Int8Array(Vec<i8>),
    /// Array of 16-bit signed integers.
    Int16Array(Vec<i16>),
    /// Array of 32-bit signed integers.
    Int32Array(Vec<i32>),
    /// Array of 64-bit signed integers.
    Int64Array(Vec<i64>),
    /// Array of platform-width unsigned integers.
    UintArray(Vec<usize>),
    /// Array of 8-bit unsigned integers.
    Uint8Array(Vec<u8>),
    /// Array of 16-bit unsigned integers.
    Uint16Array(Vec<u16>),
    /// Array of 32-bit unsigned integers.
    Uint32Array(Vec<u32>),
    /// Array of 64-bit unsigned integers.
    Uint64Array(Vec<u64>),
    /// Array of 32-bit floats.
    Float32Array(Vec<f32>),
    /// Array of 64-bit floats.
    Float64Array(Vec<f64>),
    /// Array of texts.
    StringArray(Vec<String>),
    /// Array of time instants.
    DateTimeArray(Vec<DateTime<FixedOffset>>),
    /// Array of time spans.
    DurationArray(Vec<TimeDelta>),
    /// Array of decimals.
    DecimalArray(Vec<Decimal>),
    /// Array of untyped dynamic values.
    InterfaceArray(Vec<serde_json::Value>),
}

impl Value {
    /// The type tag this payload belongs to.
    pub fn kind(&self) -> PropertyType {
        match self {
            Value::Bool(_) => PropertyType::Bool,
            Value::Int(_) => PropertyType::Int,
            Value::Int8(_) => PropertyType::Int8,
            Value::Int16(_) => PropertyType::Int16,
            Value::Int32(_) => PropertyType::Int32,
            Value::Int64(_) => PropertyType::Int64,
            Value::Uint(_) => PropertyType::Uint,
            Value::Uint8(_) => PropertyType::Uint8,
            Value::Uint16(_) => PropertyType::Uint16,
            Value::Uint32(_) => PropertyType::Uint32,
            Value::Uint64(_) => PropertyType::Uint64,
            Value::Float32(_) => PropertyType::Float32,
            Value::Float64(_) => PropertyType::Float64,
            Value::ByteArray(_) => PropertyType::ByteArray,
            Value::String(_) => PropertyType::String,
            Value::DateTime(_) => PropertyType::DateTime,
            Value::Duration(_) => PropertyType::Duration,
            Value::Decimal(_) => PropertyType::Decimal,
            Value::Interface(_) => PropertyType::Interface,
            Value::BoolArray(_) => PropertyType::BoolArray,
            Value::IntArray(_) => PropertyType::IntArray,
            Value::Int8Array(_) => PropertyType::Int8Array,
            Value::Int16Array(_) => PropertyType::Int16Array,
            Value::Int32Array(_) => PropertyType::Int32Array,
            Value::Int64Array(_) => PropertyType::Int64Array,
            Value::UintArray(_) => PropertyType::UintArray,
            Value::Uint8Array(_) => PropertyType::Uint8Array,
            Value::Uint16Array(_) => PropertyType::Uint16Array,
            Value::Uint32Array(_) => PropertyType::Uint32Array,
            Value::Uint64Array(_) => PropertyType::Uint64Array,
            Value::Float32Array(_) => PropertyType::Float32Array,
            Value::Float64Array(_) => PropertyType::Float64Array,
            Value::StringArray(_) => PropertyType::StringArray,
            Value::DateTimeArray(_) => PropertyType::DateTimeArray,
            Value::DurationArray(_) => PropertyType::DurationArray,
            Value::DecimalArray(_) => PropertyType::DecimalArray,
            Value::InterfaceArray(_) => PropertyType::InterfaceArray,
        }
    }

    /// Catch-all inference: any serializable shape becomes an untyped
    /// [`Value::Interface`]. Never fails; an unrepresentable value is `null`.
    pub fn dynamic<T: Serialize + ?Sized>(value: &T) -> Self {
        Value::Interface(serde_json::to_value(value).unwrap_or(serde_json::Value::Null))
    }

    /// Number of elements for array payloads, `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        let len = match self {
            Value::BoolArray(v) => v.len(),
            Value::IntArray(v) => v.len(),
            Value::Int8Array(v) => v.len(),
            Value::Int16Array(v) => v.len(),
            Value::Int32Array(v) => v.len(),
            Value::Int64Array(v) => v.len(),
            Value::UintArray(v) => v.len(),
            Value::Uint8Array(v) => v.len(),
            Value::Uint16Array(v) => v.len(),
            Value::Uint32Array(v) => v.len(),
            Value::Uint64Array(v) => v.len(),
            Value::Float32Array(v) => v.len(),
            Value::Float64Array(v) => v.len(),
            Value::StringArray(v) => v.len(),
            Value::DateTimeArray(v) => v.len(),
            Value::DurationArray(v) => v.len(),
            Value::DecimalArray(v) => v.len(),
            Value::InterfaceArray(v) => v.len(),
            _ => return None,
        };
        Some(len)
    }
}

/// Nanosecond count as written on the wire. Spans beyond the 64-bit
/// nanosecond range cannot be written.
fn wire_nanos<E: ser::Error>(d: &TimeDelta) -> Result<i64, E> {
    d.num_nanoseconds().ok_or_else(|| {
        E::custom(format!(
            "duration {} exceeds the 64-bit nanosecond range",
            text::format_duration(*d)
        ))
    })
}

/// Byte sequences travel as text and must be valid UTF-8.
fn wire_text<E: ser::Error>(bytes: &[u8]) -> Result<&str, E> {
    std::str::from_utf8(bytes).map_err(|e| E::custom(format!("byte sequence is not UTF-8: {e}")))
}

/// RFC-3339 only has four-digit years.
fn wire_datetime<E: ser::Error>(dt: &DateTime<FixedOffset>) -> Result<String, E> {
    if (0..=9999).contains(&dt.year()) {
        Ok(text::format_datetime(dt))
    } else {
        Err(E::custom(format!("year {} is outside 0000-9999", dt.year())))
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v as i64),
            Value::Int8(v) => serializer.serialize_i8(*v),
            Value::Int16(v) => serializer.serialize_i16(*v),
            Value::Int32(v) => serializer.serialize_i32(*v),
            Value::Int64(v) => serializer.serialize_i64(*v),
            Value::Uint(v) => serializer.serialize_u64(*v as u64),
            Value::Uint8(v) => serializer.serialize_u8(*v),
            Value::Uint16(v) => serializer.serialize_u16(*v),
            Value::Uint32(v) => serializer.serialize_u32(*v),
            Value::Uint64(v) => serializer.serialize_u64(*v),
            Value::Float32(v) => serializer.serialize_f32(*v),
            Value::Float64(v) => serializer.serialize_f64(*v),
            Value::ByteArray(v) => serializer.serialize_str(wire_text(v)?),
            Value::String(v) => serializer.serialize_str(v),
            Value::DateTime(v) => serializer.serialize_str(&wire_datetime(v)?),
            Value::Duration(v) => serializer.serialize_i64(wire_nanos(v)?),
            Value::Decimal(v) => serializer.serialize_str(&text::format_decimal(v)),
            Value::Interface(v) => v.serialize(serializer),
            Value::BoolArray(v) => v.serialize(serializer),
            Value::IntArray(v) => serializer.collect_seq(v.iter().map(|i| *i as i64)),
            Value::Int8Array(v) => v.serialize(serializer),
            Value::Int16Array(v) => v.serialize(serializer),
            Value::Int32Array(v) => v.serialize(serializer),
            Value::Int64Array(v) => v.serialize(serializer),
            Value::UintArray(v) => serializer.collect_seq(v.iter().map(|u| *u as u64)),
            Value::Uint8Array(v) => serializer.collect_seq(v),
            Value::Uint16Array(v) => v.serialize(serializer),
            Value::Uint32Array(v) => v.serialize(serializer),
            Value::Uint64Array(v) => v.serialize(serializer),
            Value::Float32Array(v) => v.serialize(serializer),
            Value::Float64Array(v) => v.serialize(serializer),
            Value::StringArray(v) => v.serialize(serializer),
            Value::DateTimeArray(v) => v
                .iter()
                .map(wire_datetime::<S::Error>)
                .collect::<Result<Vec<_>, _>>()?
                .serialize(serializer),
            Value::DurationArray(v) => v
                .iter()
                .map(wire_nanos::<S::Error>)
                .collect::<Result<Vec<_>, _>>()?
                .serialize(serializer),
            Value::DecimalArray(v) => serializer.collect_seq(v.iter().map(text::format_decimal)),
            Value::InterfaceArray(v) => v.serialize(serializer),
        }
    }
}

// Inference dispatch: each supported input shape maps to exactly one variant.
macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    isize => Int,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    usize => Uint,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    Vec<u8> => ByteArray,
    String => String,
    TimeDelta => Duration,
    Decimal => Decimal,
    serde_json::Value => Interface,
    Vec<bool> => BoolArray,
    Vec<isize> => IntArray,
    Vec<i8> => Int8Array,
    Vec<i16> => Int16Array,
    Vec<i32> => Int32Array,
    Vec<i64> => Int64Array,
    Vec<usize> => UintArray,
    Vec<u16> => Uint16Array,
    Vec<u32> => Uint32Array,
    Vec<u64> => Uint64Array,
    Vec<f32> => Float32Array,
    Vec<f64> => Float64Array,
    Vec<String> => StringArray,
    Vec<TimeDelta> => DurationArray,
    Vec<Decimal> => DecimalArray,
    Vec<serde_json::Value> => InterfaceArray,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::ByteArray(v.to_vec())
    }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        Value::StringArray(v.into_iter().map(str::to_owned).collect())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(v: DateTime<Tz>) -> Self {
        Value::DateTime(v.fixed_offset())
    }
}

impl<Tz: TimeZone> From<Vec<DateTime<Tz>>> for Value {
    fn from(v: Vec<DateTime<Tz>>) -> Self {
        Value::DateTimeArray(v.into_iter().map(|dt| dt.fixed_offset()).collect())
    }
}

/// Saturates at [`TimeDelta::MAX`]; such a span renders but does not encode.
impl From<std::time::Duration> for Value {
    fn from(v: std::time::Duration) -> Self {
        Value::Duration(TimeDelta::from_std(v).unwrap_or(TimeDelta::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn inference_picks_exact_width() {
        assert_eq!(Value::from(7i16).kind(), PropertyType::Int16);
        assert_eq!(Value::from(7usize).kind(), PropertyType::Uint);
        assert_eq!(Value::from(1.5f32).kind(), PropertyType::Float32);
        assert_eq!(Value::from("x").kind(), PropertyType::String);
        assert_eq!(Value::from(vec![1u8, 2]).kind(), PropertyType::ByteArray);
        assert_eq!(Value::from(vec![1u16, 2]).kind(), PropertyType::Uint16Array);
        assert_eq!(Value::from(Utc::now()).kind(), PropertyType::DateTime);
        assert_eq!(
            Value::from(std::time::Duration::from_secs(1)),
            Value::Duration(TimeDelta::seconds(1))
        );
        assert_eq!(Value::from(vec![json!(1), json!("a")]).kind(), PropertyType::InterfaceArray);
    }

    #[test]
    fn dynamic_catch_all() {
        #[derive(Serialize)]
        struct Point {
            x: i32,
        }
        assert_eq!(Value::dynamic(&Point { x: 3 }), Value::Interface(json!({"x": 3})));
    }

    #[test]
    fn serializes_native_literals() {
        let to_json = |v: Value| serde_json::to_string(&v).unwrap();
        assert_eq!(to_json(Value::Uint8Array(vec![10, 20, 30])), "[10,20,30]");
        assert_eq!(to_json(Value::Duration(TimeDelta::minutes(1))), "60000000000");
        assert_eq!(to_json(Value::Decimal(Decimal::new(125, 1))), "\"12.500000\"");
        assert_eq!(to_json(Value::ByteArray(b"hi".to_vec())), "\"hi\"");
        assert_eq!(to_json(Value::IntArray(vec![-1, 2])), "[-1,2]");
    }

    #[test]
    fn len_only_for_arrays() {
        assert_eq!(Value::Int8Array(vec![1, 2, 3]).len(), Some(3));
        assert_eq!(Value::Int8(1).len(), None);
        assert_eq!(Value::ByteArray(vec![1]).len(), None);
    }
}
