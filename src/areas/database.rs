//! Object database
//!
//! Stores framed objects under `objects/<aa>/<bb..>` where `aa + bb..` is the
//! hex SHA-1 of the frame. Objects are written once and never rewritten or
//! deleted.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::{Object, ObjectHeader, Unpackable, split_frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{IoResultExt, JitError, Result};
use bytes::Bytes;
use fake::rand;
use sha1::{Digest, Sha1};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Location of an object file, whether or not it exists
    pub fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).is_file()
    }

    /// Persist an object and return its id
    ///
    /// Storing content that is already present is a no-op; an existing object
    /// file is never touched.
    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        let object_id = object.object_id();
        let object_path = self.object_path(&object_id);

        if self.contains(&object_id) {
            debug!(oid = %object_id, "object already stored");
            return Ok(object_id);
        }

        let object_dir = object_path.parent().ok_or_else(|| {
            JitError::invalid_argument(format!("invalid object path {}", object_path.display()))
        })?;
        // the fan-out directory may already exist, `objects/` itself must
        match std::fs::create_dir(object_dir) {
            Err(e) if e.kind() != std::io::ErrorKind::AlreadyExists => {
                return Err(JitError::io(object_dir, e));
            }
            _ => {}
        }

        self.write_object(&object_path, object.serialize())?;
        debug!(oid = %object_id, path = %object_path.display(), "stored object");

        Ok(object_id)
    }

    /// Payload of an object: every byte after the first NUL of the frame
    pub fn load(&self, object_id: &ObjectId) -> Result<Bytes> {
        let framed = self.read_object(object_id)?;

        let (_, content) = split_frame(&framed).ok_or_else(|| {
            JitError::malformed_object(object_id.as_ref(), "missing header terminator")
        })?;
        debug!(oid = %object_id, size = content.len(), "loaded object");

        Ok(content)
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> Result<Blob> {
        let (header, content) = self.parse_frame(object_id)?;
        debug!(oid = %object_id, kind = %header.object_type, "parsing object");

        Blob::deserialize(content)
    }

    /// Parse the frame header and check the declared size against the payload
    pub fn read_header(&self, object_id: &ObjectId) -> Result<ObjectHeader> {
        let (header, _) = self.parse_frame(object_id)?;

        Ok(header)
    }

    /// Recompute the digest of the stored frame and compare it to the address
    pub fn verify(&self, object_id: &ObjectId) -> Result<()> {
        let framed = self.read_object(object_id)?;
        let actual = ObjectId::from_digest(Sha1::digest(&framed));

        if &actual != object_id {
            return Err(JitError::ChecksumMismatch {
                oid: object_id.to_string(),
                actual: actual.to_string(),
            });
        }

        Ok(())
    }

    fn read_object(&self, object_id: &ObjectId) -> Result<Bytes> {
        let object_path = self.object_path(object_id);

        match std::fs::read(&object_path) {
            Ok(content) => Ok(Bytes::from(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(JitError::not_found(format!("object {object_id}")))
            }
            Err(e) => Err(JitError::io(&object_path, e)),
        }
    }

    fn parse_frame(&self, object_id: &ObjectId) -> Result<(ObjectHeader, Bytes)> {
        let framed = self.read_object(object_id)?;

        let (header, content) = split_frame(&framed).ok_or_else(|| {
            JitError::malformed_object(object_id.as_ref(), "missing header terminator")
        })?;
        let header = ObjectHeader::parse(&header)
            .map_err(|reason| JitError::malformed_object(object_id.as_ref(), reason))?;

        if header.size != content.len() {
            return Err(JitError::malformed_object(
                object_id.as_ref(),
                format!(
                    "header declares {} bytes but payload has {}",
                    header.size,
                    content.len()
                ),
            ));
        }

        Ok((header, content))
    }

    fn write_object(&self, object_path: &Path, object_content: Bytes) -> Result<()> {
        let object_dir = object_path.parent().ok_or_else(|| {
            JitError::invalid_argument(format!("invalid object path {}", object_path.display()))
        })?;
        let mut temp_object = TempObject::create(object_dir.join(Self::generate_temp_name()))?;
        temp_object.write_all(&object_content)?;

        // link instead of rename so an existing object is never replaced
        match std::fs::hard_link(temp_object.path(), object_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                debug!(path = %object_path.display(), "object published concurrently");
                Ok(())
            }
            Err(e) => Err(JitError::io(object_path, e)),
        }
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

/// Temporary object file, removed when dropped
struct TempObject {
    path: PathBuf,
    file: std::fs::File,
}

impl TempObject {
    fn create(path: PathBuf) -> Result<Self> {
        let file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .with_path(&path)?;

        Ok(TempObject { path, file })
    }

    fn write_all(&mut self, content: &[u8]) -> Result<()> {
        self.file.write_all(content).with_path(&self.path)?;
        self.file.sync_all().with_path(&self.path)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempObject {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "unable to remove temporary object");
        }
    }
}
