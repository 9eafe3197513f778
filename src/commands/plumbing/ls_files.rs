use crate::areas::repository::Repository;

impl Repository {
    /// Print the staged paths in name order, one per line; with `stage` the
    /// full `<mode> <oid> <path>` entry is printed instead.
    pub fn ls_files(&self, stage: bool) -> anyhow::Result<()> {
        self.require_initialized()?;

        for (name, entry) in self.index().staged()? {
            if stage {
                write!(self.writer(), "{}", entry.to_line()?)?;
            } else {
                writeln!(self.writer(), "{}", name.display())?;
            }
        }

        Ok(())
    }
}
