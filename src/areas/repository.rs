use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::config::Config;
use crate::errors::{IoResultExt, JitError, Result};
use std::cell::{RefCell, RefMut};
use std::path::Path;

pub struct Repository {
    config: Config,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Index,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Open the repository described by `config`, creating the working tree
    /// directory if it does not exist yet. Command output goes to `writer`.
    pub fn new(config: Config, writer: Box<dyn std::io::Write>) -> Result<Self> {
        if !config.work_dir().exists() {
            std::fs::create_dir_all(config.work_dir()).with_path(config.work_dir())?;
        }
        let config = config.canonicalize()?;

        let index = Index::new(config.index_path().into_boxed_path());
        let database = Database::new(config.objects_dir().into_boxed_path());
        let workspace = Workspace::new(
            config.work_dir().to_path_buf().into_boxed_path(),
            config.jit_dir().to_path_buf().into_boxed_path(),
        );
        let refs = Refs::new(config.jit_dir().to_path_buf().into_boxed_path());

        Ok(Repository {
            config,
            writer: RefCell::new(writer),
            index,
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        self.config.work_dir()
    }

    pub fn jit_dir(&self) -> &Path {
        self.config.jit_dir()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Fail unless bootstrap has created the object store
    pub fn require_initialized(&self) -> Result<()> {
        if self.database.objects_path().is_dir() {
            Ok(())
        } else {
            Err(JitError::not_found(format!(
                "jit repository at {}",
                self.jit_dir().display()
            )))
        }
    }
}
