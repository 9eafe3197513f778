use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::Result;
use bytes::{BufMut, Bytes, BytesMut};
use sha1::{Digest, Sha1};
use std::path::PathBuf;

/// Terminator between the frame header and the payload
pub const HEADER_TERMINATOR: u8 = b'\0';

pub trait Packable {
    /// The framed bytes, exactly as they are written to disk
    fn serialize(&self) -> Bytes;
}

pub trait Unpackable {
    /// Rebuild the object from its payload (the bytes after the header)
    fn deserialize(content: Bytes) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn content(&self) -> &[u8];

    /// Digest of the whole frame, header included
    fn object_id(&self) -> ObjectId {
        ObjectId::from_digest(Sha1::digest(self.serialize()))
    }

    fn object_path(&self) -> PathBuf {
        self.object_id().to_path()
    }
}

/// Build `<kind> <len>\0<payload>` in a single growable buffer
pub fn frame(object_type: ObjectType, content: &[u8]) -> Bytes {
    let header = format!("{} {}", object_type.as_str(), content.len());

    let mut framed = BytesMut::with_capacity(header.len() + 1 + content.len());
    framed.put_slice(header.as_bytes());
    framed.put_u8(HEADER_TERMINATOR);
    framed.put_slice(content);

    framed.freeze()
}

/// Split framed bytes at the first NUL into `(header, payload)`
///
/// Returns `None` when there is no terminator at all.
pub fn split_frame(framed: &Bytes) -> Option<(Bytes, Bytes)> {
    let terminator = framed.iter().position(|&b| b == HEADER_TERMINATOR)?;

    Some((
        framed.slice(..terminator),
        framed.slice(terminator + 1..),
    ))
}

/// Parsed `<kind> <len>` frame header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectHeader {
    pub object_type: ObjectType,
    pub size: usize,
}

impl ObjectHeader {
    /// Parse the header bytes (terminator excluded); the error is a reason
    /// string the caller attaches to the object it was reading.
    pub fn parse(header: &[u8]) -> std::result::Result<Self, String> {
        let header =
            std::str::from_utf8(header).map_err(|_| "header is not valid UTF-8".to_string())?;
        let (kind, size) = header
            .split_once(' ')
            .ok_or_else(|| format!("header {header:?} has no size field"))?;

        let object_type = ObjectType::try_from(kind).map_err(|_| format!("unknown kind {kind:?}"))?;
        if size.is_empty() || !size.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("size {size:?} is not a decimal number"));
        }
        let size = size
            .parse::<usize>()
            .map_err(|e| format!("size {size:?} is out of range: {e}"))?;

        Ok(ObjectHeader { object_type, size })
    }
}
