//! Universal rendering. Never fails: an absent payload renders as the
//! zero text of its type.

use crate::error::PropertyError;
use crate::kind::PropertyType;
use crate::property::Property;
use crate::text;
use crate::value::Value;
use serde_json::Value as Json;
use std::fmt;

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(value) = self.value() else {
            return f.write_str(&absent_text(self.kind()));
        };
        if let Value::StringArray(items) = value {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "\"{item}\"")?;
            }
            return f.write_str("]");
        }
        match element_texts(value) {
            Some(items) => write!(f, "[{}]", items.join(",")),
            None => f.write_str(&scalar_text(value).unwrap_or_default()),
        }
    }
}

impl Property {
    /// Every element rendered as text. Scalars become a one-element list.
    ///
    /// Fails for byte sequences and for properties without a payload.
    ///
    /// ```
    /// use gobl_property::Property;
    ///
    /// let p = Property::int_array("ids", [1, 2, 3]);
    /// assert_eq!(p.as_string_array().unwrap(), ["1", "2", "3"]);
    /// assert_eq!(Property::int("n", 5).as_string_array().unwrap(), ["5"]);
    /// ```
    pub fn as_string_array(&self) -> Result<Vec<String>, PropertyError> {
        match self.value() {
            None | Some(Value::ByteArray(_)) => Err(self.mismatch()),
            Some(value) => element_texts(value)
                .or_else(|| scalar_text(value).map(|s| vec![s]))
                .ok_or_else(|| self.mismatch()),
        }
    }

    /// Like [`Property::as_string_array`], falling back to `default`.
    pub fn as_string_array_or(&self, default: Vec<String>) -> Vec<String> {
        self.as_string_array().unwrap_or(default)
    }

    /// The rendering, or `default` when it is empty.
    pub fn non_empty_string_or(&self, default: &str) -> String {
        let rendered = self.to_string();
        if rendered.is_empty() {
            default.to_owned()
        } else {
            rendered
        }
    }
}

fn absent_text(kind: PropertyType) -> String {
    use PropertyType as T;

    match kind {
        T::Undefined | T::String => String::new(),
        T::Bool => "false".to_owned(),
        T::Int
        | T::Int8
        | T::Int16
        | T::Int32
        | T::Int64
        | T::Uint
        | T::Uint8
        | T::Uint16
        | T::Uint32
        | T::Uint64 => "0".to_owned(),
        T::Float32 | T::Float64 | T::Decimal => text::format_float(0.0),
        T::DateTime => text::format_datetime(&text::epoch()),
        T::Duration => "0s".to_owned(),
        T::Interface => "{}".to_owned(),
        _ => "[]".to_owned(),
    }
}

fn interface_text(value: &Json) -> String {
    match value {
        Json::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Bool(v) => v.to_string(),
        Value::Int(v) => v.to_string(),
        Value::Int8(v) => v.to_string(),
        Value::Int16(v) => v.to_string(),
        Value::Int32(v) => v.to_string(),
        Value::Int64(v) => v.to_string(),
        Value::Uint(v) => v.to_string(),
        Value::Uint8(v) => v.to_string(),
        Value::Uint16(v) => v.to_string(),
        Value::Uint32(v) => v.to_string(),
        Value::Uint64(v) => v.to_string(),
        Value::Float32(v) => text::format_float(f64::from(*v)),
        Value::Float64(v) => text::format_float(*v),
        Value::ByteArray(v) => String::from_utf8_lossy(v).into_owned(),
        Value::String(v) => v.clone(),
        Value::DateTime(v) => text::format_datetime(v),
        Value::Duration(v) => text::format_duration(*v),
        Value::Decimal(v) => text::format_decimal(v),
        Value::Interface(v) => interface_text(v),
        _ => return None,
    };
    Some(text)
}

fn element_texts(value: &Value) -> Option<Vec<String>> {
    fn each<T>(items: &[T], render: impl Fn(&T) -> String) -> Vec<String> {
        items.iter().map(render).collect()
    }

    let texts = match value {
        Value::BoolArray(v) => each(v, ToString::to_string),
        Value::IntArray(v) => each(v, ToString::to_string),
        Value::Int8Array(v) => each(v, ToString::to_string),
        Value::Int16Array(v) => each(v, ToString::to_string),
        Value::Int32Array(v) => each(v, ToString::to_string),
        Value::Int64Array(v) => each(v, ToString::to_string),
        Value::UintArray(v) => each(v, ToString::to_string),
        Value::Uint8Array(v) => each(v, ToString::to_string),
        Value::Uint16Array(v) => each(v, ToString::to_string),
        Value::Uint32Array(v) => each(v, ToString::to_string),
        Value::Uint64Array(v) => each(v, ToString::to_string),
        Value::Float32Array(v) => each(v, |x| text::format_float(f64::from(*x))),
        Value::Float64Array(v) => each(v, |x| text::format_float(*x)),
        Value::StringArray(v) => v.clone(),
        Value::DateTimeArray(v) => each(v, text::format_datetime),
        Value::DurationArray(v) => each(v, |d| text::format_duration(*d)),
        Value::DecimalArray(v) => each(v, text::format_decimal),
        Value::InterfaceArray(v) => each(v, interface_text),
        _ => return None,
    };
    Some(texts)
}
