use crate::areas::refs::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use crate::errors::{IoResultExt, JitError, Result};
use anyhow::Context;
use std::fs::DirBuilder;
use std::os::unix::fs::DirBuilderExt;
use std::path::Path;
use tracing::{info, warn};

/// rwxr-xr-x
const DIR_MODE: u32 = 0o755;

impl Repository {
    /// Create the repository skeleton: `objects/`, `refs/heads/`, `HEAD` and
    /// an empty `index`.
    ///
    /// Refuses to run when the repository directory already exists. If any
    /// later step fails the partially created directory is removed again.
    pub fn bootstrap(&self) -> Result<()> {
        self.bootstrap_with(Self::populate)
    }

    fn bootstrap_with(&self, populate: impl FnOnce(&Self) -> Result<()>) -> Result<()> {
        let jit_dir = self.jit_dir();
        let already_exists = || JitError::AlreadyExists {
            path: jit_dir.to_path_buf(),
        };

        if jit_dir.is_dir() {
            return Err(already_exists());
        }

        // another bootstrap may win the race between the check and mkdir
        match DirBuilder::new().mode(DIR_MODE).create(jit_dir) {
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(already_exists());
            }
            result => result.with_path(jit_dir)?,
        }

        if let Err(e) = populate(self) {
            if let Err(cleanup) = std::fs::remove_dir_all(jit_dir) {
                warn!(path = %jit_dir.display(), error = %cleanup, "unable to remove partial repository");
            }
            return Err(e);
        }

        info!(path = %jit_dir.display(), "initialized repository");
        Ok(())
    }

    pub fn init(&self) -> anyhow::Result<()> {
        self.bootstrap()
            .context("Failed to initialize empty Jit repository")?;

        writeln!(
            self.writer(),
            "Initialized empty Jit repository in {}",
            self.jit_dir().display()
        )?;

        Ok(())
    }

    fn populate(&self) -> Result<()> {
        Self::make_directory(self.database().objects_path())?;
        Self::make_directory(&self.refs().refs_path())?;
        Self::make_directory(&self.refs().heads_path())?;

        self.refs().set_head(DEFAULT_BRANCH)?;

        let index_path = self.index().path();
        std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(index_path)
            .with_path(index_path)?;

        Ok(())
    }

    fn make_directory(path: &Path) -> Result<()> {
        DirBuilder::new()
            .mode(DIR_MODE)
            .create(path)
            .with_path(path)
    }
}
