//! # gobl-property: strongly-tagged dynamic values
//!
//! A [`Property`] is a named value whose type is one of a closed set of 38
//! [`PropertyType`] tags. The payload is a [`Value`] sum type with exactly one
//! variant per tag, so a property tagged `Int16` always holds an `i16`.
//!
//! ## The Pieces
//!
//! | Piece | Types | What it does |
//! |-------|-------|-------------|
//! | Registry | [`PropertyType`] | Fixed wire codes and labels |
//! | Payload | [`Value`] | Exact representation per tag, inference via `From` |
//! | Record | [`Property`] | Typed constructors, strict and defaulting accessors, rendering |
//! | Collection | [`Properties`] | Name-keyed entries with additive decode |
//! | Boundary | [`PropertyStore`], [`StoredValue`] | Where collections cross into storage |
//!
//! ## Wire Format
//!
//! ```text
//! {"name": "amount", "type": 18, "value": "12.500000"}
//! ```
//!
//! Numbers are decoded from their literal text and narrowed to the declared
//! tag; a literal outside the tag's range is an error, never a truncation.
//!
//! ```
//! use gobl_property::{Property, PropertyError};
//!
//! let ok = Property::decode_str(r#"{"name":"u","type":27,"value":[10,20,30]}"#).unwrap();
//! assert_eq!(ok.as_uint8_array().unwrap(), &[10, 20, 30]);
//!
//! let err = Property::decode_str(r#"{"name":"u","type":27,"value":[10,20,256]}"#).unwrap_err();
//! assert!(matches!(err, PropertyError::OutOfRange { .. }));
//! ```

#![deny(missing_docs)]

mod coerce;
pub mod error;
pub mod keys;
pub mod kind;
pub mod properties;
pub mod property;
mod render;
pub mod store;
pub mod text;
pub mod value;
mod wire;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use error::{PropertyError, StoreError};
pub use keys::{KEY_LONG_DESC, KEY_SHORT_DESC, KEY_USAGE};
pub use kind::PropertyType;
pub use properties::{Properties, StoredValue};
pub use property::Property;
pub use store::PropertyStore;
pub use value::Value;
