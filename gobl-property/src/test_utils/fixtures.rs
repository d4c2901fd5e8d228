//! One property per type, with payloads that survive a wire round trip.

use crate::{Properties, Property};
use chrono::{DateTime, FixedOffset, Offset, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde_json::json;

fn instant() -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(3600).unwrap_or_else(|| Utc.fix());
    let utc = DateTime::<Utc>::UNIX_EPOCH
        + TimeDelta::seconds(1_709_210_096)
        + TimeDelta::nanoseconds(123_456_789);
    utc.with_timezone(&offset)
}

/// One property of every type, named after its type label. The
/// [`PropertyType::Undefined`](crate::PropertyType::Undefined) entry has no payload.
pub fn one_of_each() -> Vec<Property> {
    let at = instant();
    vec![
        Property::empty().renamed("Undefined"),
        Property::bool("Bool", true),
        Property::int("Int", isize::MIN),
        Property::int8("Int8", -128),
        Property::int16("Int16", 32_767),
        Property::int32("Int32", -7),
        Property::int64("Int64", i64::MAX),
        Property::uint("Uint", usize::MAX),
        Property::uint8("Uint8", 255),
        Property::uint16("Uint16", 65_535),
        Property::uint32("Uint32", 4_000_000_000),
        Property::uint64("Uint64", u64::MAX),
        Property::float32("Float32", 0.1),
        Property::float64("Float64", -2.25),
        Property::byte_array("ByteArray", *b"raw bytes"),
        Property::string("String", "text"),
        Property::datetime("DateTime", at),
        Property::duration("Duration", TimeDelta::minutes(90)),
        Property::decimal("Decimal", Decimal::new(125, 1)),
        Property::interface("Interface", json!({"k": [1, "two", true]})),
        Property::bool_array("BoolArray", [true, false]),
        Property::int_array("IntArray", [-1, 0, 1]),
        Property::int8_array("Int8Array", [i8::MIN, i8::MAX]),
        Property::int16_array("Int16Array", [i16::MIN, 3]),
        Property::int32_array("Int32Array", [i32::MAX]),
        Property::int64_array("Int64Array", [i64::MIN, 0]),
        Property::uint_array("UintArray", [0, 7]),
        Property::uint8_array("Uint8Array", [10, 20, 30]),
        Property::uint16_array("Uint16Array", [u16::MAX]),
        Property::uint32_array("Uint32Array", [1, u32::MAX]),
        Property::uint64_array("Uint64Array", [u64::MAX, 0]),
        Property::float32_array("Float32Array", [0.5, -1.25]),
        Property::float64_array("Float64Array", [1e300, 0.1]),
        Property::string_array("StringArray", ["a", "b c", ""]),
        Property::datetime_array("DateTimeArray", [at, DateTime::<Utc>::UNIX_EPOCH.fixed_offset()]),
        Property::duration_array("DurationArray", [TimeDelta::nanoseconds(1), TimeDelta::seconds(-2)]),
        Property::decimal_array("DecimalArray", [Decimal::new(-1, 6), Decimal::new(123_456, 2)]),
        Property::interface_array("InterfaceArray", [json!(1), json!("x"), json!(null)]),
    ]
}

/// [`one_of_each`] as a collection.
pub fn sample_properties() -> Properties {
    one_of_each().into_iter().collect()
}
