//! Wire codec for a single [`Property`]:
//! `{"name": <text>, "type": <code>, "value": <literal>}`.

use crate::coerce;
use crate::error::PropertyError;
use crate::kind::PropertyType;
use crate::property::Property;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

impl Serialize for Property {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Property", 3)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("type", &self.kind())?;
        state.serialize_field("value", &self.value())?;
        state.end()
    }
}

/// A property as read off the wire, before coercion. `value` keeps every
/// number as its literal text.
#[derive(Debug, Deserialize)]
pub(crate) struct WireProperty {
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    kind: PropertyType,
    #[serde(default)]
    value: serde_json::Value,
}

impl WireProperty {
    pub(crate) fn into_property(self) -> Result<Property, PropertyError> {
        let value = coerce::decode_value(self.kind, self.value)?;
        Ok(Property::from_parts(self.name, self.kind, value))
    }
}

impl<'de> Deserialize<'de> for Property {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        WireProperty::deserialize(deserializer)?
            .into_property()
            .map_err(de::Error::custom)
    }
}

impl Property {
    /// Serialize to the wire format.
    ///
    /// ```
    /// use gobl_property::Property;
    /// use rust_decimal::Decimal;
    ///
    /// let bytes = Property::decimal("amount", Decimal::new(125, 1)).encode().unwrap();
    /// assert_eq!(bytes, br#"{"name":"amount","type":18,"value":"12.500000"}"#);
    /// ```
    pub fn encode(&self) -> Result<Vec<u8>, PropertyError> {
        serde_json::to_vec(self).map_err(|e| PropertyError::Encode(e.to_string()))
    }

    /// Parse the wire format, narrowing every literal to the declared type.
    pub fn decode(bytes: &[u8]) -> Result<Self, PropertyError> {
        let wire: WireProperty = serde_json::from_slice(bytes)?;
        wire.into_property()
    }

    /// [`Property::decode`] from text.
    pub fn decode_str(text: &str) -> Result<Self, PropertyError> {
        Self::decode(text.as_bytes())
    }

    /// Replace `self` with the decoded property. On error `self` is untouched.
    pub fn decode_into(&mut self, bytes: &[u8]) -> Result<(), PropertyError> {
        *self = Self::decode(bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use chrono::{TimeDelta, TimeZone, Utc};
    use rust_decimal::Decimal;
    use serde_json::json;

    fn encoded(p: &Property) -> String {
        String::from_utf8(p.encode().unwrap()).unwrap()
    }

    #[test]
    fn encodes_name_code_and_literal() {
        assert_eq!(
            encoded(&Property::duration("d", TimeDelta::minutes(1))),
            r#"{"name":"d","type":17,"value":60000000000}"#
        );
        assert_eq!(
            encoded(&Property::uint8_array("u", [10, 20, 30])),
            r#"{"name":"u","type":27,"value":[10,20,30]}"#
        );
        assert_eq!(
            encoded(&Property::absent("x", PropertyType::Int8)),
            r#"{"name":"x","type":3,"value":null}"#
        );
        assert_eq!(
            encoded(&Property::empty()),
            r#"{"name":"","type":0,"value":null}"#
        );
    }

    #[test]
    fn decimal_round_trips_numerically() {
        let p = Property::decimal("amount", Decimal::new(125, 1));
        let back = Property::decode(&p.encode().unwrap()).unwrap();
        assert_eq!(back.as_decimal().unwrap(), Decimal::new(125, 1));
        assert_eq!(back, p);
    }

    #[test]
    fn decimal_accepts_numeric_literal() {
        let p = Property::decode_str(r#"{"name":"m","type":18,"value":0.1}"#).unwrap();
        assert_eq!(p.as_decimal().unwrap(), Decimal::new(1, 1));
    }

    #[test]
    fn missing_fields_default() {
        let p = Property::decode_str("{}").unwrap();
        assert_eq!(p, Property::empty());
        let p = Property::decode_str(r#"{"name":"n","type":1}"#).unwrap();
        assert_eq!(p, Property::absent("n", PropertyType::Bool));
    }

    #[test]
    fn bad_input_is_malformed() {
        for bad in ["", "[", r#"{"name":1}"#, r#"{"type":"Int8"}"#, r#"{"type":99}"#] {
            assert!(
                matches!(Property::decode_str(bad), Err(PropertyError::MalformedWire(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn decode_into_is_all_or_nothing() {
        let mut target = Property::string("keep", "me");
        let err = target
            .decode_into(br#"{"name":"u","type":27,"value":[10,20,256]}"#)
            .unwrap_err();
        assert!(matches!(err, PropertyError::OutOfRange { .. }));
        assert_eq!(target, Property::string("keep", "me"));

        target
            .decode_into(br#"{"name":"u","type":27,"value":[10,20,255]}"#)
            .unwrap();
        assert_eq!(target.as_uint8_array().unwrap(), &[10, 20, 255]);
    }

    #[test]
    fn embeds_in_other_documents() {
        let doc = json!({"prop": Property::int16("n", -2)});
        assert_eq!(doc, json!({"prop": {"name": "n", "type": 4, "value": -2}}));

        let text = r#"{"prop":{"name":"n","type":4,"value":40000}}"#;
        let err = serde_json::from_str::<std::collections::HashMap<String, Property>>(text)
            .unwrap_err();
        assert!(err.to_string().contains("40000"));
    }

    #[test]
    fn unrepresentable_payloads_fail_to_encode() {
        let far = TimeDelta::days(365 * 300);
        let too_late = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
        let cases = [
            Property::duration("d", far),
            Property::duration("d", -far),
            Property::duration_array("d", [TimeDelta::seconds(1), far]),
            Property::new("d", std::time::Duration::from_secs(u64::MAX)),
            Property::byte_array("b", [0xff, 0x00, 0x41]),
            Property::datetime("t", too_late),
            Property::datetime_array("t", [too_late]),
        ];
        for p in cases {
            assert!(
                matches!(p.encode(), Err(PropertyError::Encode(_))),
                "{:?}",
                p.kind()
            );
            let props: crate::Properties = [p].into_iter().collect();
            assert!(matches!(props.encode(), Err(PropertyError::Encode(_))));
        }
    }

    #[test]
    fn edge_payloads_round_trip() {
        let cases = [
            Property::duration("d", TimeDelta::nanoseconds(i64::MAX)),
            Property::byte_array("b", [0x00, 0x41, 0xc3, 0xa9]),
            Property::datetime("t", Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap()),
        ];
        for p in cases {
            let back = Property::decode(&p.encode().unwrap()).unwrap();
            assert_eq!(back, p);
        }
    }

    #[test]
    fn interface_payloads_pass_through() {
        let p = Property::interface("i", json!({"k": [1, 2.5, "x"]}));
        let back = Property::decode(&p.encode().unwrap()).unwrap();
        assert_eq!(back.value(), Some(&Value::Interface(json!({"k": [1, 2.5, "x"]}))));
    }
}
