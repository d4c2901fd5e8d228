//! The [`Property`] record: typed constructors and accessors.

use crate::error::PropertyError;
use crate::kind::PropertyType;
use crate::value::Value;
use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone};
use rust_decimal::Decimal;
use serde::Serialize;

/// A named, type-tagged value.
///
/// The payload is `None` when absent. A property built through one of the
/// constructors always carries a payload whose variant matches its
/// [`kind`](Property::kind); the fields are private so that cannot drift.
///
/// ```
/// use gobl_property::{Property, PropertyType};
///
/// let port = Property::uint16("port", 8080);
/// assert_eq!(port.kind(), PropertyType::Uint16);
/// assert_eq!(port.as_uint16().unwrap(), 8080);
/// assert!(port.as_int32().is_err());
/// assert_eq!(port.to_string(), "8080");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Property {
    name: String,
    kind: PropertyType,
    value: Option<Value>,
}

impl Property {
    /// An unnamed [`PropertyType::Undefined`] property.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A property of type `kind` with no payload.
    pub fn absent(name: impl Into<String>, kind: PropertyType) -> Self {
        Self {
            name: name.into(),
            kind,
            value: None,
        }
    }

    /// Infer the type from the payload's shape.
    ///
    /// ```
    /// use gobl_property::{Property, PropertyType};
    ///
    /// assert_eq!(Property::new("n", 5i8).kind(), PropertyType::Int8);
    /// assert_eq!(Property::new("s", "x").kind(), PropertyType::String);
    /// assert_eq!(Property::new("b", vec![1u8]).kind(), PropertyType::ByteArray);
    /// ```
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with(name, value.into())
    }

    /// Catch-all constructor: any serializable value becomes an untyped
    /// [`PropertyType::Interface`] property.
    pub fn dynamic<T: Serialize + ?Sized>(name: impl Into<String>, value: &T) -> Self {
        Self::with(name, Value::dynamic(value))
    }

    pub(crate) fn with(name: impl Into<String>, value: Value) -> Self {
        let kind = value.kind();
        let value = match value {
            Value::Interface(serde_json::Value::Null) => None,
            value => Some(value),
        };
        Self {
            name: name.into(),
            kind,
            value,
        }
    }

    pub(crate) fn from_parts(name: String, kind: PropertyType, value: Option<Value>) -> Self {
        Self { name, kind, value }
    }

    /// The property name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type tag.
    pub fn kind(&self) -> PropertyType {
        self.kind
    }

    /// The payload, if present.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// True when the property carries no payload.
    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    /// Take the payload out of the property.
    pub fn into_value(self) -> Option<Value> {
        self.value
    }

    /// The same property under another name.
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The payload in its wire shape, e.g. a decimal as its fixed-point text.
    pub fn to_dynamic(&self) -> Result<serde_json::Value, PropertyError> {
        let value = self.value.as_ref().ok_or_else(|| self.mismatch())?;
        serde_json::to_value(value).map_err(|e| PropertyError::Encode(e.to_string()))
    }

    pub(crate) fn mismatch(&self) -> PropertyError {
        PropertyError::TypeMismatch {
            name: self.name.clone(),
            actual: self.kind,
        }
    }
}

macro_rules! scalar_constructors {
    ($($ctor:ident($ty:ty) => $variant:ident;)*) => {
        impl Property {
            $(
                #[doc = concat!("A [`PropertyType::", stringify!($variant), "`] property.")]
                pub fn $ctor(name: impl Into<String>, value: $ty) -> Self {
                    Self::with(name, Value::$variant(value))
                }
            )*
        }
    };
}

scalar_constructors! {
    bool(bool) => Bool;
    int(isize) => Int;
    int8(i8) => Int8;
    int16(i16) => Int16;
    int32(i32) => Int32;
    int64(i64) => Int64;
    uint(usize) => Uint;
    uint8(u8) => Uint8;
    uint16(u16) => Uint16;
    uint32(u32) => Uint32;
    uint64(u64) => Uint64;
    float32(f32) => Float32;
    float64(f64) => Float64;
    duration(TimeDelta) => Duration;
    decimal(Decimal) => Decimal;
}

macro_rules! array_constructors {
    ($($ctor:ident($ty:ty) => $variant:ident;)*) => {
        impl Property {
            $(
                #[doc = concat!("A [`PropertyType::", stringify!($variant), "`] property.")]
                pub fn $ctor(name: impl Into<String>, values: impl IntoIterator<Item = $ty>) -> Self {
                    Self::with(name, Value::$variant(values.into_iter().collect()))
                }
            )*
        }
    };
}

array_constructors! {
    bool_array(bool) => BoolArray;
    int_array(isize) => IntArray;
    int8_array(i8) => Int8Array;
    int16_array(i16) => Int16Array;
    int32_array(i32) => Int32Array;
    int64_array(i64) => Int64Array;
    uint_array(usize) => UintArray;
    uint8_array(u8) => Uint8Array;
    uint16_array(u16) => Uint16Array;
    uint32_array(u32) => Uint32Array;
    uint64_array(u64) => Uint64Array;
    float32_array(f32) => Float32Array;
    float64_array(f64) => Float64Array;
    duration_array(TimeDelta) => DurationArray;
    decimal_array(Decimal) => DecimalArray;
    interface_array(serde_json::Value) => InterfaceArray;
}

impl Property {
    /// A [`PropertyType::ByteArray`] property.
    pub fn byte_array(name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self::with(name, Value::ByteArray(value.into()))
    }

    /// A [`PropertyType::String`] property.
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with(name, Value::String(value.into()))
    }

    /// A [`PropertyType::DateTime`] property. The instant keeps its offset.
    pub fn datetime<Tz: TimeZone>(name: impl Into<String>, value: DateTime<Tz>) -> Self {
        Self::with(name, Value::DateTime(value.fixed_offset()))
    }

    /// A [`PropertyType::Interface`] property. JSON `null` is stored as an
    /// absent payload.
    pub fn interface(name: impl Into<String>, value: serde_json::Value) -> Self {
        Self::with(name, Value::Interface(value))
    }

    /// A [`PropertyType::StringArray`] property.
    pub fn string_array<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::with(name, Value::StringArray(values.into_iter().map(Into::into).collect()))
    }

    /// A [`PropertyType::DateTimeArray`] property.
    pub fn datetime_array<Tz: TimeZone>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = DateTime<Tz>>,
    ) -> Self {
        Self::with(
            name,
            Value::DateTimeArray(values.into_iter().map(|dt| dt.fixed_offset()).collect()),
        )
    }
}

// Strict accessors return the payload only when its variant matches;
// the `_or` forms swallow the mismatch and hand back the default.
macro_rules! copy_accessors {
    ($($get:ident, $or:ident => $variant:ident: $ty:ty;)*) => {
        impl Property {
            $(
                #[doc = concat!("The payload of a [`PropertyType::", stringify!($variant), "`] property.")]
                pub fn $get(&self) -> Result<$ty, PropertyError> {
                    match &self.value {
                        Some(Value::$variant(v)) => Ok(*v),
                        _ => Err(self.mismatch()),
                    }
                }

                #[doc = concat!("Like [`Property::", stringify!($get), "`], falling back to `default`.")]
                pub fn $or(&self, default: $ty) -> $ty {
                    self.$get().unwrap_or(default)
                }
            )*
        }
    };
}

copy_accessors! {
    as_bool, as_bool_or => Bool: bool;
    as_int, as_int_or => Int: isize;
    as_int8, as_int8_or => Int8: i8;
    as_int16, as_int16_or => Int16: i16;
    as_int32, as_int32_or => Int32: i32;
    as_int64, as_int64_or => Int64: i64;
    as_uint, as_uint_or => Uint: usize;
    as_uint8, as_uint8_or => Uint8: u8;
    as_uint16, as_uint16_or => Uint16: u16;
    as_uint32, as_uint32_or => Uint32: u32;
    as_uint64, as_uint64_or => Uint64: u64;
    as_float32, as_float32_or => Float32: f32;
    as_float64, as_float64_or => Float64: f64;
    as_datetime, as_datetime_or => DateTime: DateTime<FixedOffset>;
    as_duration, as_duration_or => Duration: TimeDelta;
    as_decimal, as_decimal_or => Decimal: Decimal;
}

macro_rules! slice_accessors {
    ($($get:ident, $or:ident => $variant:ident: $ty:ty;)*) => {
        impl Property {
            $(
                #[doc = concat!("The payload of a [`PropertyType::", stringify!($variant), "`] property.")]
                pub fn $get(&self) -> Result<&$ty, PropertyError> {
                    match &self.value {
                        Some(Value::$variant(v)) => Ok(&v[..]),
                        _ => Err(self.mismatch()),
                    }
                }

                #[doc = concat!("Like [`Property::", stringify!($get), "`], falling back to `default`.")]
                pub fn $or<'a>(&'a self, default: &'a $ty) -> &'a $ty {
                    self.$get().unwrap_or(default)
                }
            )*
        }
    };
}

slice_accessors! {
    as_byte_array, as_byte_array_or => ByteArray: [u8];
    as_str, as_str_or => String: str;
    as_bool_array, as_bool_array_or => BoolArray: [bool];
    as_int_array, as_int_array_or => IntArray: [isize];
    as_int8_array, as_int8_array_or => Int8Array: [i8];
    as_int16_array, as_int16_array_or => Int16Array: [i16];
    as_int32_array, as_int32_array_or => Int32Array: [i32];
    as_int64_array, as_int64_array_or => Int64Array: [i64];
    as_uint_array, as_uint_array_or => UintArray: [usize];
    as_uint8_array, as_uint8_array_or => Uint8Array: [u8];
    as_uint16_array, as_uint16_array_or => Uint16Array: [u16];
    as_uint32_array, as_uint32_array_or => Uint32Array: [u32];
    as_uint64_array, as_uint64_array_or => Uint64Array: [u64];
    as_float32_array, as_float32_array_or => Float32Array: [f32];
    as_float64_array, as_float64_array_or => Float64Array: [f64];
    as_datetime_array, as_datetime_array_or => DateTimeArray: [DateTime<FixedOffset>];
    as_duration_array, as_duration_array_or => DurationArray: [TimeDelta];
    as_decimal_array, as_decimal_array_or => DecimalArray: [Decimal];
    as_interface_array, as_interface_array_or => InterfaceArray: [serde_json::Value];
}

impl Property {
    /// The text of a [`PropertyType::String`] property, owned.
    pub fn as_string(&self) -> Result<String, PropertyError> {
        self.as_str().map(str::to_owned)
    }

    /// The elements of a [`PropertyType::StringArray`] property.
    pub fn as_str_array(&self) -> Result<&[String], PropertyError> {
        match &self.value {
            Some(Value::StringArray(v)) => Ok(v),
            _ => Err(self.mismatch()),
        }
    }

    /// The payload of a [`PropertyType::Interface`] property.
    pub fn as_interface(&self) -> Result<&serde_json::Value, PropertyError> {
        match &self.value {
            Some(Value::Interface(v)) => Ok(v),
            _ => Err(self.mismatch()),
        }
    }

    /// Like [`Property::as_interface`], falling back to `default`.
    pub fn as_interface_or<'a>(&'a self, default: &'a serde_json::Value) -> &'a serde_json::Value {
        self.as_interface().unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn typed_constructors_tag_exactly() {
        let cases = [
            (Property::int("a", -1), PropertyType::Int),
            (Property::uint8("a", 1), PropertyType::Uint8),
            (Property::uint8_array("a", [1, 2]), PropertyType::Uint8Array),
            (Property::byte_array("a", *b"xy"), PropertyType::ByteArray),
            (Property::string_array("a", ["x", "y"]), PropertyType::StringArray),
            (Property::datetime("a", Utc::now()), PropertyType::DateTime),
            (Property::interface("a", json!([1])), PropertyType::Interface),
        ];
        for (property, kind) in cases {
            assert_eq!(property.kind(), kind);
            assert_eq!(property.value().map(Value::kind), Some(kind));
        }
    }

    #[test]
    fn interface_null_is_absent() {
        let p = Property::interface("x", serde_json::Value::Null);
        assert_eq!(p.kind(), PropertyType::Interface);
        assert!(p.is_absent());
        assert!(Property::dynamic("y", &Option::<i32>::None).is_absent());
    }

    #[test]
    fn mismatch_names_property_and_actual_type() {
        let p = Property::int32("count", 3);
        let err = p.as_bool().unwrap_err();
        assert_eq!(
            err,
            PropertyError::TypeMismatch {
                name: "count".into(),
                actual: PropertyType::Int32,
            }
        );
        assert_eq!(err.to_string(), "count has type Int32");
        assert!(p.as_bool_or(true));
        assert!(!p.as_bool_or(false));
    }

    #[test]
    fn width_is_part_of_the_type() {
        let p = Property::int16("n", 7);
        assert_eq!(p.as_int16().unwrap(), 7);
        assert!(p.as_int32().is_err());
        assert!(p.as_int().is_err());
        assert_eq!(p.as_int64_or(-1), -1);
    }

    #[test]
    fn absent_payload_fails_strict_accessors() {
        let p = Property::absent("flag", PropertyType::Bool);
        assert!(p.as_bool().is_err());
        assert!(p.as_bool_or(true));
        assert!(p.to_dynamic().is_err());
    }

    #[test]
    fn borrowed_accessors() {
        let p = Property::string("s", "hello");
        assert_eq!(p.as_str().unwrap(), "hello");
        assert_eq!(p.as_string().unwrap(), "hello");
        assert_eq!(p.as_byte_array_or(b"none"), b"none");

        let p = Property::decimal_array("d", [Decimal::ONE, Decimal::TWO]);
        assert_eq!(p.as_decimal_array().unwrap(), &[Decimal::ONE, Decimal::TWO]);
        assert!(p.as_decimal().is_err());
    }

    #[test]
    fn to_dynamic_uses_wire_shapes() {
        let p = Property::duration("d", TimeDelta::seconds(2));
        assert_eq!(p.to_dynamic().unwrap(), json!(2_000_000_000i64));
        let p = Property::decimal("m", Decimal::new(5, 1));
        assert_eq!(p.to_dynamic().unwrap(), json!("0.500000"));
    }

    #[test]
    fn renamed_keeps_payload() {
        let p = Property::bool("a", true).renamed("b");
        assert_eq!(p.name(), "b");
        assert!(p.as_bool().unwrap());
    }
}
