//! Object types and operations
//!
//! Every object is stored in its framed form, `<kind> <size>\0<content>`, and
//! addressed by the SHA-1 digest of that whole frame. Only blobs exist.

pub mod blob;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the fan-out directory component of an object path
pub const FAN_OUT_LENGTH: usize = 2;
