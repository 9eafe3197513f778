use crate::artifacts::index::entry_mode::FileMode;
use crate::errors::{IoResultExt, JitError, Result};
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// Working tree rooted at `path`; the repository directory inside it is
/// never listed.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
    jit_dir: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>, jit_dir: Box<Path>) -> Self {
        Workspace { path, jit_dir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a user supplied path to its location relative to the root
    ///
    /// Relative paths are taken from the working tree root. Only the parent
    /// directory is resolved, so a symlink keeps its own name. Paths that do
    /// not exist are `NotFound`; paths outside the tree are rejected.
    pub fn relative_path(&self, file_path: &Path) -> Result<PathBuf> {
        let joined_path = self.path.join(file_path);
        let absolute_path = match (joined_path.parent(), joined_path.file_name()) {
            (Some(parent), Some(name)) => parent.canonicalize().with_path(file_path)?.join(name),
            _ => joined_path.canonicalize().with_path(file_path)?,
        };
        std::fs::symlink_metadata(&absolute_path).with_path(file_path)?;

        absolute_path
            .strip_prefix(&self.path)
            .map(Path::to_path_buf)
            .map_err(|_| {
                JitError::invalid_argument(format!(
                    "{} is outside the working tree {}",
                    file_path.display(),
                    self.path.display()
                ))
            })
    }

    /// Expand a path into the files it designates, relative to the root
    ///
    /// A file yields itself; a directory yields every file beneath it in
    /// name order, skipping the repository directory. Symlinks and anything
    /// inside the repository directory cannot be staged.
    pub fn list_files(&self, file_path: &Path) -> Result<Vec<PathBuf>> {
        let relative_path = self.relative_path(file_path)?;
        let absolute_path = self.path.join(&relative_path);

        if absolute_path.starts_with(&self.jit_dir) {
            return Err(JitError::invalid_argument(format!(
                "{} is inside the repository directory",
                file_path.display()
            )));
        }

        let metadata = std::fs::symlink_metadata(&absolute_path).with_path(file_path)?;
        if metadata.file_type().is_symlink() {
            return Err(JitError::invalid_argument(format!(
                "{} is a symbolic link",
                file_path.display()
            )));
        }
        if !metadata.is_dir() {
            return Ok(vec![relative_path]);
        }

        WalkDir::new(&absolute_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_ignored(entry))
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(self.strip_root(entry.path())),
                Ok(entry) if entry.path_is_symlink() => {
                    warn!(path = %entry.path().display(), "skipping symbolic link");
                    None
                }
                Ok(_) => None,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    Some(Err(JitError::io(path, e.into())))
                }
            })
            .collect()
    }

    fn is_ignored(&self, entry: &DirEntry) -> bool {
        entry.file_type().is_dir() && entry.path() == self.jit_dir.as_ref()
    }

    fn strip_root(&self, path: &Path) -> Result<PathBuf> {
        path.strip_prefix(&self.path)
            .map(Path::to_path_buf)
            .map_err(|_| {
                JitError::invalid_argument(format!(
                    "{} is outside the working tree",
                    path.display()
                ))
            })
    }

    pub fn read_file(&self, file_path: &Path) -> Result<Bytes> {
        let file_path = self.path.join(file_path);

        let content = std::fs::read(&file_path).with_path(&file_path)?;

        Ok(Bytes::from(content))
    }

    pub fn stat_file(&self, file_path: &Path) -> Result<FileMode> {
        let file_path = self.path.join(file_path);
        let metadata = std::fs::symlink_metadata(&file_path).with_path(&file_path)?;

        FileMode::try_from((file_path.as_path(), &metadata))
    }
}
