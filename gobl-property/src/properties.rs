//! [`Properties`]: a keyed collection of [`Property`].

use crate::error::PropertyError;
use crate::property::Property;
use crate::wire::WireProperty;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Properties keyed by name.
///
/// Keys are kept sorted, so iteration and the wire encoding are canonical.
/// The key usually equals the entry's own name but is not required to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    entries: BTreeMap<String, Property>,
}

/// A column value as handed over by a byte-oriented store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredValue {
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Text.
    Text(String),
}

impl StoredValue {
    /// The stored bytes, whichever form they arrived in.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            StoredValue::Bytes(b) => b,
            StoredValue::Text(t) => t.as_bytes(),
        }
    }

    /// Number of stored bytes.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Properties {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `property` under `key`, returning the entry it replaced.
    pub fn set(&mut self, key: impl Into<String>, property: Property) -> Option<Property> {
        self.entries.insert(key.into(), property)
    }

    /// Store `property` under its own name.
    pub fn add(&mut self, property: Property) -> Option<Property> {
        self.set(property.name().to_owned(), property)
    }

    /// The entry stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Property> {
        self.entries.get(key)
    }

    /// The entry under `key`, inserting `property` first if there is none.
    pub fn get_or_insert(&mut self, key: impl Into<String>, property: Property) -> &Property {
        self.entries.entry(key.into()).or_insert(property)
    }

    /// The entry under `key`, or [`PropertyError::NotFound`].
    pub fn require(&self, key: &str) -> Result<&Property, PropertyError> {
        self.get(key)
            .ok_or_else(|| PropertyError::NotFound(key.to_owned()))
    }

    /// Remove and return the entry under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Property> {
        self.entries.remove(key)
    }

    /// True when `key` has an entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Property> {
        self.entries.iter()
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All entries, cloned, in key order.
    pub fn properties(&self) -> Vec<Property> {
        self.entries.values().cloned().collect()
    }

    /// Serialize to the wire format: an object keyed by property name.
    pub fn encode(&self) -> Result<Vec<u8>, PropertyError> {
        serde_json::to_vec(self).map_err(|e| PropertyError::Encode(e.to_string()))
    }

    /// Parse the wire format into a new collection.
    pub fn decode(bytes: &[u8]) -> Result<Self, PropertyError> {
        let mut properties = Self::new();
        properties.decode_into(bytes)?;
        Ok(properties)
    }

    /// [`Properties::decode`] from text.
    pub fn decode_str(text: &str) -> Result<Self, PropertyError> {
        Self::decode(text.as_bytes())
    }

    /// Decode and merge into `self`, replacing entries with the same key and
    /// keeping the rest. Nothing is inserted unless every entry decodes.
    ///
    /// ```
    /// use gobl_property::{Properties, Property};
    ///
    /// let mut props: Properties = [Property::bool("kept", true)].into_iter().collect();
    /// props.decode_into(br#"{"n":{"name":"n","type":3,"value":-5}}"#).unwrap();
    /// assert_eq!(props.len(), 2);
    /// assert_eq!(props.require("n").unwrap().as_int8().unwrap(), -5);
    /// ```
    pub fn decode_into(&mut self, bytes: &[u8]) -> Result<(), PropertyError> {
        let wire: BTreeMap<String, WireProperty> = serde_json::from_slice(bytes)?;
        let decoded = wire
            .into_iter()
            .map(|(key, w)| Ok((key, w.into_property()?)))
            .collect::<Result<Vec<_>, PropertyError>>()?;
        self.entries.extend(decoded);
        Ok(())
    }

    /// The column value a store should persist. Always bytes.
    pub fn to_stored(&self) -> Result<StoredValue, PropertyError> {
        self.encode().map(StoredValue::Bytes)
    }

    /// Merge a column value read back from a store into `self`.
    pub fn scan(&mut self, column: Option<StoredValue>) -> Result<(), PropertyError> {
        match column {
            None => Err(PropertyError::NullColumn),
            Some(stored) => self.decode_into(stored.as_bytes()),
        }
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, property) in &self.entries {
            map.serialize_entry(key, property)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<String, Property>::deserialize(deserializer)?;
        Ok(Self { entries })
    }
}

impl FromIterator<Property> for Properties {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        let mut properties = Self::new();
        properties.extend(iter);
        properties
    }
}

impl Extend<Property> for Properties {
    fn extend<I: IntoIterator<Item = Property>>(&mut self, iter: I) {
        for property in iter {
            self.add(property);
        }
    }
}

impl IntoIterator for Properties {
    type Item = (String, Property);
    type IntoIter = btree_map::IntoIter<String, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = (&'a String, &'a Property);
    type IntoIter = btree_map::Iter<'a, String, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
