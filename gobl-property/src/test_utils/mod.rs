//! Fixtures and a minimal store for testing.
//!
//! Available behind the `test-utils` feature flag.

mod fixtures;
mod in_memory_store;

pub use fixtures::{one_of_each, sample_properties};
pub use in_memory_store::InMemoryStore;
