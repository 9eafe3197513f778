//! Blob object
//!
//! Blobs store file content. They contain only the raw bytes, without any
//! metadata like filename or permissions (those live in the index).
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`

use crate::artifacts::objects::object::{frame, Object, Packable, Unpackable};
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::Result;
use bytes::Bytes;

/// Raw file content, binary-safe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn new(content: impl Into<Bytes>) -> Self {
        Blob {
            content: content.into(),
        }
    }

    pub fn into_content(self) -> Bytes {
        self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> Bytes {
        frame(self.object_type(), &self.content)
    }
}

impl Unpackable for Blob {
    fn deserialize(content: Bytes) -> Result<Self> {
        // the header has already been stripped
        Ok(Self::new(content))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn content(&self) -> &[u8] {
        &self.content
    }
}
