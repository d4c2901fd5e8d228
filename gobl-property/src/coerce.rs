//! Decode-side coercion from wire literals to exact payloads.
//!
//! The JSON layer hands every number over as its original literal text
//! (`serde_json` is built with `arbitrary_precision`). Each literal is first
//! read as an exact token and only then narrowed to the width and signedness
//! the declared [`PropertyType`] demands, failing with
//! [`PropertyError::OutOfRange`] instead of truncating.

use crate::error::PropertyError;
use crate::kind::PropertyType;
use crate::text;
use crate::value::Value;
use chrono::{DateTime, FixedOffset, TimeDelta};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value as Json;
use std::fmt::Display;

/// Convert the wire literal of one property into its payload.
///
/// `null` is an absent payload for every type; a payload carried by an
/// [`PropertyType::Undefined`] property is dropped.
pub(crate) fn decode_value(kind: PropertyType, raw: Json) -> Result<Option<Value>, PropertyError> {
    use PropertyType as T;

    if raw.is_null() {
        return Ok(None);
    }
    let value = match kind {
        T::Undefined => return Ok(None),
        T::Bool => Value::Bool(boolean(kind, &raw)?),
        T::Int => Value::Int(integer(kind, &raw)?),
        T::Int8 => Value::Int8(integer(kind, &raw)?),
        T::Int16 => Value::Int16(integer(kind, &raw)?),
        T::Int32 => Value::Int32(integer(kind, &raw)?),
        T::Int64 => Value::Int64(integer(kind, &raw)?),
        T::Uint => Value::Uint(integer(kind, &raw)?),
        T::Uint8 => Value::Uint8(integer(kind, &raw)?),
        T::Uint16 => Value::Uint16(integer(kind, &raw)?),
        T::Uint32 => Value::Uint32(integer(kind, &raw)?),
        T::Uint64 => Value::Uint64(integer(kind, &raw)?),
        T::Float32 => Value::Float32(float32(kind, &raw)?),
        T::Float64 => Value::Float64(float64(kind, &raw)?),
        T::ByteArray => Value::ByteArray(bytes(kind, &raw)?),
        T::String => Value::String(string(kind, &raw)?),
        T::DateTime => Value::DateTime(datetime(kind, &raw)?),
        T::Duration => Value::Duration(duration(kind, &raw)?),
        T::Decimal => Value::Decimal(decimal(kind, &raw)?),
        T::Interface => Value::Interface(raw),
        T::BoolArray => Value::BoolArray(elements(kind, raw, boolean)?),
        T::IntArray => Value::IntArray(elements(kind, raw, integer)?),
        T::Int8Array => Value::Int8Array(elements(kind, raw, integer)?),
        T::Int16Array => Value::Int16Array(elements(kind, raw, integer)?),
        T::Int32Array => Value::Int32Array(elements(kind, raw, integer)?),
        T::Int64Array => Value::Int64Array(elements(kind, raw, integer)?),
        T::UintArray => Value::UintArray(elements(kind, raw, integer)?),
        T::Uint8Array => Value::Uint8Array(elements(kind, raw, integer)?),
        T::Uint16Array => Value::Uint16Array(elements(kind, raw, integer)?),
        T::Uint32Array => Value::Uint32Array(elements(kind, raw, integer)?),
        T::Uint64Array => Value::Uint64Array(elements(kind, raw, integer)?),
        T::Float32Array => Value::Float32Array(elements(kind, raw, float32)?),
        T::Float64Array => Value::Float64Array(elements(kind, raw, float64)?),
        T::StringArray => Value::StringArray(elements(kind, raw, string)?),
        T::DateTimeArray => Value::DateTimeArray(elements(kind, raw, datetime)?),
        T::DurationArray => Value::DurationArray(elements(kind, raw, duration)?),
        T::DecimalArray => Value::DecimalArray(elements(kind, raw, decimal)?),
        T::InterfaceArray => match raw {
            Json::Array(items) => Value::InterfaceArray(items),
            other => return Err(unexpected(kind, &other)),
        },
    };
    Ok(Some(value))
}

/// JSON shape of an array element; every element must share the first one's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Null,
    Bool,
    Number,
    Text,
    Array,
    Object,
}

impl Shape {
    fn of(raw: &Json) -> Self {
        match raw {
            Json::Null => Shape::Null,
            Json::Bool(_) => Shape::Bool,
            Json::Number(_) => Shape::Number,
            Json::String(_) => Shape::Text,
            Json::Array(_) => Shape::Array,
            Json::Object(_) => Shape::Object,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Shape::Null => "null",
            Shape::Bool => "boolean",
            Shape::Number => "number",
            Shape::Text => "string",
            Shape::Array => "array",
            Shape::Object => "object",
        }
    }
}

fn unexpected(kind: PropertyType, raw: &Json) -> PropertyError {
    PropertyError::malformed(format!(
        "unexpected {} literal for data type {kind}",
        Shape::of(raw).name()
    ))
}

fn elements<T>(
    kind: PropertyType,
    raw: Json,
    convert: fn(PropertyType, &Json) -> Result<T, PropertyError>,
) -> Result<Vec<T>, PropertyError> {
    let Json::Array(items) = raw else {
        return Err(unexpected(kind, &raw));
    };
    // The first element decides how the whole array is read.
    if let Some(first) = items.first() {
        let shape = Shape::of(first);
        if let Some((index, item)) = items
            .iter()
            .enumerate()
            .find(|(_, item)| Shape::of(item) != shape)
        {
            return Err(PropertyError::malformed(format!(
                "element {index} of {kind} is a {} but the first element is a {}",
                Shape::of(item).name(),
                shape.name()
            )));
        }
    }
    items.iter().map(|item| convert(kind, item)).collect()
}

/// Host integer types the decoder narrows into.
trait Integer: Sized + Copy + Display + TryFrom<i128> {
    const LOWER: Self;
    const UPPER: Self;
}

macro_rules! integer_bounds {
    ($($ty:ty),*) => {
        $(
            impl Integer for $ty {
                const LOWER: Self = <$ty>::MIN;
                const UPPER: Self = <$ty>::MAX;
            }
        )*
    };
}

integer_bounds!(isize, i8, i16, i32, i64, usize, u8, u16, u32, u64);

fn out_of_range(kind: PropertyType, literal: &str, lower: impl Display, upper: impl Display) -> PropertyError {
    PropertyError::OutOfRange {
        literal: literal.to_owned(),
        kind,
        bound: format!("[{lower}, {upper}]"),
    }
}

fn number_literal(kind: PropertyType, raw: &Json) -> Result<String, PropertyError> {
    match raw {
        Json::Number(n) => Ok(n.to_string()),
        other => Err(unexpected(kind, other)),
    }
}

/// Read an integer literal exactly. `Ok(None)` means the literal is an
/// integer too large for any host integer.
fn exact_integer(kind: PropertyType, literal: &str) -> Result<Option<i128>, PropertyError> {
    if let Ok(v) = literal.parse::<i128>() {
        return Ok(Some(v));
    }
    let digits = literal.strip_prefix('-').unwrap_or(literal);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(None);
    }
    // Fraction or exponent notation is fine as long as the value is integral.
    let d = match text::parse_decimal(literal) {
        Ok(d) => d,
        // Integral but beyond the decimal range, so beyond every integer tag.
        Err(_) if literal.parse::<f64>().is_ok_and(|f| f.is_finite() && f.fract() == 0.0) => {
            return Ok(None);
        }
        Err(_) => return Err(PropertyError::parse(kind, literal, "invalid integer literal")),
    };
    if !d.fract().is_zero() {
        return Err(PropertyError::parse(kind, literal, "not an integer"));
    }
    Ok(d.to_i128())
}

fn integer<I: Integer>(kind: PropertyType, raw: &Json) -> Result<I, PropertyError> {
    let literal = number_literal(kind, raw)?;
    exact_integer(kind, &literal)?
        .and_then(|v| I::try_from(v).ok())
        .ok_or_else(|| out_of_range(kind, &literal, I::LOWER, I::UPPER))
}

fn float32(kind: PropertyType, raw: &Json) -> Result<f32, PropertyError> {
    let literal = number_literal(kind, raw)?;
    let v: f32 = literal
        .parse()
        .map_err(|e| PropertyError::parse(kind, &literal, e))?;
    if v.is_infinite() {
        return Err(out_of_range(
            kind,
            &literal,
            format!("{:e}", f32::MIN),
            format!("{:e}", f32::MAX),
        ));
    }
    Ok(v)
}

fn float64(kind: PropertyType, raw: &Json) -> Result<f64, PropertyError> {
    let literal = number_literal(kind, raw)?;
    let v: f64 = literal
        .parse()
        .map_err(|e| PropertyError::parse(kind, &literal, e))?;
    if v.is_infinite() {
        return Err(out_of_range(
            kind,
            &literal,
            format!("{:e}", f64::MIN),
            format!("{:e}", f64::MAX),
        ));
    }
    Ok(v)
}

fn boolean(kind: PropertyType, raw: &Json) -> Result<bool, PropertyError> {
    match raw {
        Json::Bool(b) => Ok(*b),
        Json::String(s) => text::parse_bool(s),
        other => Err(unexpected(kind, other)),
    }
}

fn string(kind: PropertyType, raw: &Json) -> Result<String, PropertyError> {
    match raw {
        Json::String(s) => Ok(s.clone()),
        Json::Number(n) => Ok(n.to_string()),
        Json::Bool(b) => Ok(b.to_string()),
        other => Err(unexpected(kind, other)),
    }
}

fn bytes(kind: PropertyType, raw: &Json) -> Result<Vec<u8>, PropertyError> {
    match raw {
        Json::String(s) => Ok(s.as_bytes().to_vec()),
        other => Err(unexpected(kind, other)),
    }
}

fn datetime(kind: PropertyType, raw: &Json) -> Result<DateTime<FixedOffset>, PropertyError> {
    match raw {
        Json::String(s) => text::parse_datetime(s),
        other => Err(unexpected(kind, other)),
    }
}

fn duration(kind: PropertyType, raw: &Json) -> Result<TimeDelta, PropertyError> {
    match raw {
        Json::Number(_) => integer::<i64>(kind, raw).map(TimeDelta::nanoseconds),
        Json::String(s) => text::parse_duration(s),
        other => Err(unexpected(kind, other)),
    }
}

fn decimal(kind: PropertyType, raw: &Json) -> Result<Decimal, PropertyError> {
    match raw {
        Json::Number(n) => text::parse_decimal(&n.to_string()),
        Json::String(s) => text::parse_decimal(s),
        other => Err(unexpected(kind, other)),
    }
}
