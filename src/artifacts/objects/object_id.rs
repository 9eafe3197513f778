//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character lowercase hexadecimal strings representing the
//! SHA-1 digest of a framed object.
//!
//! ## Storage
//!
//! Objects are stored in `.jit/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{FAN_OUT_LENGTH, OBJECT_ID_LENGTH};
use crate::errors::{JitError, Result};
use sha1::digest::Output;
use sha1::Sha1;
use std::path::PathBuf;
use std::str::FromStr;

/// Object identifier
///
/// Always holds exactly 40 lowercase hex characters; construction goes
/// through [`ObjectId::try_parse`] or [`ObjectId::from_digest`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Upper-case hex digits are accepted and normalized to lower case.
    pub fn try_parse(id: impl AsRef<str>) -> Result<Self> {
        let id = id.as_ref();

        if id.len() != OBJECT_ID_LENGTH {
            return Err(JitError::invalid_argument(format!(
                "object id must be {OBJECT_ID_LENGTH} hex characters, got {}: {id:?}",
                id.len()
            )));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(JitError::invalid_argument(format!(
                "object id contains non-hex characters: {id:?}"
            )));
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Build an object ID from a finished SHA-1 digest
    pub fn from_digest(digest: Output<Sha1>) -> Self {
        Self(format!("{digest:x}"))
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(FAN_OUT_LENGTH);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> &str {
        &self.0[..7]
    }
}

impl FromStr for ObjectId {
    type Err = JitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_parse(s)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
