//! Repository location
//!
//! Every area is handed its path from a `Config` instead of looking at the
//! process working directory, so a repository can live anywhere (tests use
//! temporary directories).

use crate::errors::{IoResultExt, Result};
use std::path::{Path, PathBuf};

/// Name of the repository directory inside the working tree
pub const DEFAULT_JIT_DIR: &str = ".jit";

/// Environment variable overriding the repository directory
pub const JIT_DIR_ENV: &str = "JIT_DIR";

/// Environment variable holding the log filter
pub const JIT_LOG_ENV: &str = "JIT_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Working tree root; staged paths are relative to it
    work_dir: PathBuf,
    /// Repository directory holding `objects/`, `refs/`, `HEAD` and `index`
    jit_dir: PathBuf,
}

impl Config {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        let work_dir = work_dir.into();
        let jit_dir = work_dir.join(DEFAULT_JIT_DIR);

        Config { work_dir, jit_dir }
    }

    /// Override the repository directory. Relative paths are resolved
    /// against the working tree root.
    pub fn with_jit_dir(self, jit_dir: impl AsRef<Path>) -> Self {
        let jit_dir = self.work_dir.join(jit_dir);

        Config { jit_dir, ..self }
    }

    /// Resolve both directories to absolute, symlink-free paths
    ///
    /// The working tree must exist; the repository directory may not exist
    /// yet (before bootstrap), in which case only its parent is resolved.
    pub fn canonicalize(&self) -> Result<Config> {
        let work_dir = self.work_dir.canonicalize().with_path(&self.work_dir)?;

        let jit_dir = match self.jit_dir.canonicalize() {
            Ok(jit_dir) => jit_dir,
            Err(_) => match (self.jit_dir.parent(), self.jit_dir.file_name()) {
                (Some(parent), Some(name)) => match parent.canonicalize() {
                    Ok(parent) => parent.join(name),
                    Err(_) => self.jit_dir.clone(),
                },
                _ => self.jit_dir.clone(),
            },
        };

        Ok(Config { work_dir, jit_dir })
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn jit_dir(&self) -> &Path {
        &self.jit_dir
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.jit_dir.join("objects")
    }

    pub fn index_path(&self) -> PathBuf {
        self.jit_dir.join("index")
    }
}
