//! Well-known keys for application metadata stored as properties.

/// Key for a one-line usage string.
pub const KEY_USAGE: &str = "usage";

/// Key for a short description.
pub const KEY_SHORT_DESC: &str = "shortDesc";

/// Key for a long description.
pub const KEY_LONG_DESC: &str = "longDesc";
