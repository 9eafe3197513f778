//! Index entry representation
//!
//! Each entry records a staged file as `(mode, oid, path)` and is stored as a
//! single line of the index file. Paths are relative to the working tree root
//! and may contain spaces; the path is always the last field.

use crate::artifacts::index::FIELD_SEPARATOR;
use crate::artifacts::index::entry_mode::FileMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{JitError, Result};
use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// File path relative to the working tree root
    pub name: PathBuf,
    /// Object holding the staged content
    pub oid: ObjectId,
    pub mode: FileMode,
}

impl IndexEntry {
    /// Render the entry as an index line, trailing newline included
    pub fn to_line(&self) -> Result<String> {
        let name = Self::validate_name(&self.name)?;

        Ok(format!(
            "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}\n",
            self.mode, self.oid, name
        ))
    }

    /// Parse one index line (without its newline); `line_no` is 1-based and
    /// only used for error reporting.
    pub fn parse(line: &str, line_no: usize) -> Result<Self> {
        let mut fields = line.splitn(3, FIELD_SEPARATOR);
        let (Some(mode), Some(oid), Some(name)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(JitError::malformed_index(
                line_no,
                format!("expected `<mode> <oid> <path>`, got {line:?}"),
            ));
        };

        let mode = FileMode::parse_octal(mode)
            .map_err(|e| JitError::malformed_index(line_no, e.to_string()))?;
        let oid =
            ObjectId::try_parse(oid).map_err(|e| JitError::malformed_index(line_no, e.to_string()))?;
        if name.is_empty() {
            return Err(JitError::malformed_index(line_no, "empty path"));
        }

        Ok(IndexEntry::new(PathBuf::from(name), oid, mode))
    }

    /// Check that a path can be represented in the line format
    pub fn validate_name(name: &Path) -> Result<&str> {
        let text = name.to_str().ok_or_else(|| {
            JitError::invalid_argument(format!("path {} is not valid UTF-8", name.display()))
        })?;

        if text.is_empty() {
            return Err(JitError::invalid_argument("path is empty"));
        }
        if name.is_absolute() {
            return Err(JitError::invalid_argument(format!(
                "path {text:?} must be relative to the working tree"
            )));
        }
        if text.contains(['\n', '\r']) {
            return Err(JitError::invalid_argument(format!(
                "path {text:?} contains a line break"
            )));
        }

        Ok(text)
    }
}
