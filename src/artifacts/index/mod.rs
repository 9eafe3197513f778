//! Staging index format
//!
//! The index is a plain text, append-only log with one line per staged file:
//!
//! ```text
//! <mode: 6-digit octal> <oid: 40 hex> <path>\n
//! ```
//!
//! Staging the same path twice appends a second line; readers keep the last
//! entry per path.

pub mod entry_mode;
pub mod index_entry;

/// Separator between the fields of an index line
pub const FIELD_SEPARATOR: char = ' ';
