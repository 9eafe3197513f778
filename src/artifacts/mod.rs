//! Value types and their on-disk encodings
//!
//! - `index`: staged entries and file modes
//! - `objects`: object ids, kinds, framing and blobs

pub mod index;
pub mod objects;
