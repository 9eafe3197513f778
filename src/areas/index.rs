//! Staging index
//!
//! An append-only text log of `(mode, oid, path)` lines. Staging never reads
//! or rewrites earlier lines, so staging the same path twice leaves two
//! entries; [`Index::staged`] reconstructs the current state by keeping the
//! last entry per path.
//!
//! ## Locking
//!
//! Appends hold an exclusive advisory lock on the index file and reads hold
//! a shared one, so concurrent processes never observe a half-written line.

use crate::artifacts::index::entry_mode::FileMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{IoResultExt, JitError, Result};
use file_guard::Lock;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.jit/index`)
    path: Box<Path>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record that `name` was staged with `mode` as object `oid`
    pub fn stage(&self, name: &Path, mode: FileMode, oid: &ObjectId) -> Result<IndexEntry> {
        let entry = IndexEntry::new(name.to_path_buf(), oid.clone(), mode);
        self.append(&entry)?;

        Ok(entry)
    }

    /// Append one entry line; existing lines are never touched
    pub fn append(&self, entry: &IndexEntry) -> Result<()> {
        let line = entry.to_line()?;

        let mut index_file = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(self.path())
            .with_path(self.path())?;
        let mut lock =
            file_guard::lock(&mut index_file, Lock::Exclusive, 0, 1).with_path(self.path())?;

        // a single write keeps the line whole under O_APPEND
        lock.write_all(line.as_bytes()).with_path(self.path())?;
        debug!(path = %entry.name.display(), oid = %entry.oid, mode = %entry.mode, "staged entry");

        Ok(())
    }

    /// Every entry in staging order, duplicates included
    ///
    /// A missing index file reads as empty.
    pub fn load(&self) -> Result<Vec<IndexEntry>> {
        let mut index_file = match std::fs::File::open(self.path()) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(JitError::io(self.path(), e)),
        };
        let mut lock =
            file_guard::lock(&mut index_file, Lock::Shared, 0, 1).with_path(self.path())?;

        let mut content = Vec::new();
        lock.read_to_end(&mut content).with_path(self.path())?;

        Self::parse_entries(&content)
    }

    /// Current staged state: the last entry recorded for each path
    pub fn staged(&self) -> Result<BTreeMap<PathBuf, IndexEntry>> {
        Ok(self
            .load()?
            .into_iter()
            .map(|entry| (entry.name.clone(), entry))
            .collect())
    }

    pub fn entry_by_path(&self, path: &Path) -> Result<Option<IndexEntry>> {
        Ok(self
            .load()?
            .into_iter()
            .rev()
            .find(|entry| entry.name == path))
    }

    fn parse_entries(content: &[u8]) -> Result<Vec<IndexEntry>> {
        if content.is_empty() {
            return Ok(Vec::new());
        }

        let mut lines = content.split(|&b| b == b'\n').collect::<Vec<_>>();
        // a well-formed index ends with a newline, leaving one empty tail
        match lines.pop() {
            Some([]) => {}
            _ => {
                return Err(JitError::malformed_index(
                    lines.len() + 1,
                    "last line is missing its newline",
                ));
            }
        }

        lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                let line_no = i + 1;
                let line = std::str::from_utf8(line)
                    .map_err(|_| JitError::malformed_index(line_no, "line is not valid UTF-8"))?;

                IndexEntry::parse(line, line_no)
            })
            .collect()
    }
}
