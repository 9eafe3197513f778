use crate::errors::{IoResultExt, Result};
use file_guard::Lock;
use std::io::Write;
use std::path::Path;

/// Branch HEAD points at in a fresh repository
pub const DEFAULT_BRANCH: &str = "main";

#[derive(Debug)]
pub struct Refs {
    path: Box<Path>,
}

impl Refs {
    pub fn new(path: Box<Path>) -> Self {
        Refs { path }
    }

    /// Point HEAD at `refs/heads/<branch>`
    pub fn set_head(&self, branch: &str) -> Result<()> {
        let head_path = self.head_path();
        // open the HEAD file as WRONLY and CREAT to write the symbolic ref to it
        let mut head_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&head_path)
            .with_path(&head_path)?;
        let mut lock = file_guard::lock(&mut head_file, Lock::Exclusive, 0, 1).with_path(&head_path)?;

        lock.write_all(format!("ref: refs/heads/{branch}\n").as_bytes())
            .with_path(&head_path)
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join("HEAD").into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}
