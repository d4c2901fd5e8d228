//! The closed registry of property types.
//!
//! Every [`PropertyType`] has a permanent integer code (its wire identity)
//! and a label used in messages and as its textual name. Codes must never
//! change: previously persisted data refers to them.

use crate::error::PropertyError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Type tag of a [`Property`](crate::Property) payload.
#[repr(u8)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyType {
    /// Absent / zero.
    #[default]
    Undefined = 0,
    /// Boolean.
    Bool = 1,
    /// Platform-width signed integer.
    Int = 2,
    /// 8-bit signed integer.
    Int8 = 3,
    /// 16-bit signed integer.
    Int16 = 4,
    /// 32-bit signed integer.
    Int32 = 5,
    /// 64-bit signed integer.
    Int64 = 6,
    /// Platform-width unsigned integer.
    Uint = 7,
    /// 8-bit unsigned integer.
    Uint8 = 8,
    /// 16-bit unsigned integer.
    Uint16 = 9,
    /// 32-bit unsigned integer.
    Uint32 = 10,
    /// 64-bit unsigned integer.
    Uint64 = 11,
    /// 32-bit float.
    Float32 = 12,
    /// 64-bit float.
    Float64 = 13,
    /// Raw byte sequence.
    ByteArray = 14,
    /// Text.
    String = 15,
    /// Absolute time instant.
    DateTime = 16,
    /// Signed time span.
    Duration = 17,
    /// Arbitrary-precision decimal.
    Decimal = 18,
    /// Untyped dynamic value.
    Interface = 19,
    /// Array of booleans.
    BoolArray = 20,
    /// Array of platform-width signed integers.
    IntArray = 21,
    /// Array of 8-bit signed integers.
    Int8Array = 22,
    /// Array of 16-bit signed integers.
    Int16Array = 23,
    /// Array of 32-bit signed integers.
    Int32Array = 24,
    /// Array of 64-bit signed integers.
    Int64Array = 25,
    /// Array of platform-width unsigned integers.
    UintArray = 26,
    /// Array of 8-bit unsigned integers.
    Uint8Array = 27,
    /// Array of 16-bit unsigned integers.
    Uint16Array = 28,
    /// Array of 32-bit unsigned integers.
    Uint32Array = 29,
    /// Array of 64-bit unsigned integers.
    Uint64Array = 30,
    /// Array of 32-bit floats.
    Float32Array = 31,
    /// Array of 64-bit floats.
    Float64Array = 32,
    /// Array of texts.
    StringArray = 33,
    /// Array of time instants.
    DateTimeArray = 34,
    /// Array of time spans.
    DurationArray = 35,
    /// Array of decimals.
    DecimalArray = 36,
    /// Array of untyped dynamic values.
    InterfaceArray = 37,
}

use PropertyType::*;

const LABELS: [&str; 38] = [
    "Undefined",
    "Bool",
    "Int",
    "Int8",
    "Int16",
    "Int32",
    "Int64",
    "Uint",
    "Uint8",
    "Uint16",
    "Uint32",
    "Uint64",
    "Float32",
    "Float64",
    "ByteArray",
    "String",
    "DateTime",
    "Duration",
    "Decimal",
    "Interface",
    "BoolArray",
    "IntArray",
    "Int8Array",
    "Int16Array",
    "Int32Array",
    "Int64Array",
    "UintArray",
    "Uint8Array",
    "Uint16Array",
    "Uint32Array",
    "Uint64Array",
    "Float32Array",
    "Float64Array",
    "StringArray",
    "DateTimeArray",
    "DurationArray",
    "DecimalArray",
    "InterfaceArray",
];

static BY_LABEL: LazyLock<HashMap<&'static str, PropertyType>> = LazyLock::new(|| {
    PropertyType::ALL
        .iter()
        .map(|kind| (kind.label(), *kind))
        .collect()
});

impl PropertyType {
    /// Every type, indexed by its code.
    pub const ALL: [PropertyType; 38] = [
        Undefined,
        Bool,
        Int,
        Int8,
        Int16,
        Int32,
        Int64,
        Uint,
        Uint8,
        Uint16,
        Uint32,
        Uint64,
        Float32,
        Float64,
        ByteArray,
        String,
        DateTime,
        Duration,
        Decimal,
        Interface,
        BoolArray,
        IntArray,
        Int8Array,
        Int16Array,
        Int32Array,
        Int64Array,
        UintArray,
        Uint8Array,
        Uint16Array,
        Uint32Array,
        Uint64Array,
        Float32Array,
        Float64Array,
        StringArray,
        DateTimeArray,
        DurationArray,
        DecimalArray,
        InterfaceArray,
    ];

    /// The permanent wire code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look a type up by wire code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// The canonical label, e.g. `"Int16Array"`.
    pub fn label(self) -> &'static str {
        LABELS[usize::from(self.code())]
    }

    /// Look a type up by label. Unknown labels map to [`PropertyType::Undefined`];
    /// use [`str::parse`] for a strict lookup.
    pub fn from_label(label: &str) -> Self {
        BY_LABEL.get(label).copied().unwrap_or(Undefined)
    }

    /// True for the homogeneous-array families.
    pub fn is_array(self) -> bool {
        self.code() >= BoolArray.code()
    }

    /// The scalar family of an array type. Scalars map to themselves.
    pub fn element_type(self) -> Self {
        match self {
            BoolArray => Bool,
            IntArray => Int,
            Int8Array => Int8,
            Int16Array => Int16,
            Int32Array => Int32,
            Int64Array => Int64,
            UintArray => Uint,
            Uint8Array => Uint8,
            Uint16Array => Uint16,
            Uint32Array => Uint32,
            Uint64Array => Uint64,
            Float32Array => Float32,
            Float64Array => Float64,
            StringArray => String,
            DateTimeArray => DateTime,
            DurationArray => Duration,
            DecimalArray => Decimal,
            InterfaceArray => Interface,
            scalar => scalar,
        }
    }

    /// The array family of a scalar type, if it has one.
    pub fn array_type(self) -> Option<Self> {
        let array = match self {
            Bool => BoolArray,
            Int => IntArray,
            Int8 => Int8Array,
            Int16 => Int16Array,
            Int32 => Int32Array,
            Int64 => Int64Array,
            Uint => UintArray,
            Uint8 => Uint8Array,
            Uint16 => Uint16Array,
            Uint32 => Uint32Array,
            Uint64 => Uint64Array,
            Float32 => Float32Array,
            Float64 => Float64Array,
            String => StringArray,
            DateTime => DateTimeArray,
            Duration => DurationArray,
            Decimal => DecimalArray,
            Interface => InterfaceArray,
            Undefined | ByteArray => return None,
            array => array,
        };
        Some(array)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for PropertyType {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BY_LABEL
            .get(s)
            .copied()
            .ok_or_else(|| PropertyError::UnknownLabel(s.to_owned()))
    }
}

impl TryFrom<u8> for PropertyType {
    type Error = PropertyError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(PropertyError::UnknownCode(code))
    }
}

impl From<PropertyType> for u8 {
    fn from(kind: PropertyType) -> Self {
        kind.code()
    }
}

impl Serialize for PropertyType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for PropertyType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        PropertyType::try_from(code).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_index_the_table() {
        for (code, kind) in PropertyType::ALL.iter().enumerate() {
            assert_eq!(usize::from(kind.code()), code);
            assert_eq!(PropertyType::from_code(kind.code()), Some(*kind));
        }
        assert_eq!(PropertyType::from_code(38), None);
    }

    #[test]
    fn labels_round_trip() {
        for kind in PropertyType::ALL {
            assert_eq!(PropertyType::from_label(kind.label()), kind);
            assert_eq!(kind.label().parse::<PropertyType>().unwrap(), kind);
            assert_eq!(format!("{kind:?}"), kind.label());
        }
    }

    #[test]
    fn unknown_label_is_lenient_or_strict() {
        assert_eq!(PropertyType::from_label("Complex128"), Undefined);
        assert_eq!(
            "Complex128".parse::<PropertyType>(),
            Err(PropertyError::UnknownLabel("Complex128".into()))
        );
    }

    #[test]
    fn array_families_pair_up() {
        for kind in PropertyType::ALL {
            if let Some(array) = kind.array_type() {
                assert!(array.is_array());
                if !kind.is_array() {
                    assert_eq!(array.element_type(), kind);
                }
            }
        }
        assert_eq!(ByteArray.array_type(), None);
        assert_eq!(Undefined.array_type(), None);
        assert!(!Interface.is_array());
        assert!(InterfaceArray.is_array());
    }

    #[test]
    fn serializes_as_code() {
        assert_eq!(serde_json::to_string(&Decimal).unwrap(), "18");
        let back: PropertyType = serde_json::from_str("27").unwrap();
        assert_eq!(back, Uint8Array);
        assert!(serde_json::from_str::<PropertyType>("38").is_err());
    }
}
