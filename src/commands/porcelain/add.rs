use crate::areas::repository::Repository;
use crate::artifacts::index::entry_mode::FileMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::blob::Blob;
use crate::errors::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};

impl Repository {
    pub fn add(&self, paths: &[String]) -> anyhow::Result<()> {
        self.require_initialized()?;

        // Expand every argument before touching the store, so a missing path
        // fails the command before anything is staged
        let files = paths
            .iter()
            .map(|path| {
                self.workspace()
                    .list_files(Path::new(path))
                    .with_context(|| format!("Unable to resolve pathspec '{path}'"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
            .into_iter()
            .flatten()
            .collect::<Vec<PathBuf>>();

        for file in files {
            let entry = self
                .add_file(&file)
                .with_context(|| format!("Unable to add '{}'", file.display()))?;

            writeln!(self.writer(), "add '{}'", entry.name.display())?;
        }

        Ok(())
    }

    /// Store one working tree file and stage it
    ///
    /// The content is read and stored before the mode is looked up; if the
    /// lookup fails the object stays in the store and nothing is staged.
    pub fn add_file(&self, path: &Path) -> Result<IndexEntry> {
        self.add_file_with(path, |path| self.workspace().stat_file(path))
    }

    fn add_file_with(
        &self,
        path: &Path,
        stat: impl FnOnce(&Path) -> Result<FileMode>,
    ) -> Result<IndexEntry> {
        IndexEntry::validate_name(path)?;

        let data = self.workspace().read_file(path)?;
        let blob_id = self.database().store(&Blob::new(data))?;
        let mode = stat(path)?;

        self.index().stage(path, mode, &blob_id)
    }
}
