use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use std::path::Path;

impl Repository {
    pub fn hash_object(&self, object_path: &str) -> anyhow::Result<()> {
        self.require_initialized()?;

        // read object file
        let object_data = self
            .workspace()
            .read_file(Path::new(object_path))
            .with_context(|| format!("Unable to read '{object_path}'"))?;

        // frame, hash and write it to the object database
        let object_id = self.database().store(&Blob::new(object_data))?;

        writeln!(self.writer(), "{object_id}")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::areas::repository::Repository;
    use crate::artifacts::objects::object_id::ObjectId;
    use crate::config::Config;
    use crate::errors::JitError;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;

    fn initialized(dir: &TempDir) -> Repository {
        let repository =
            Repository::new(Config::new(dir.path()), Box::new(std::io::sink())).unwrap();
        repository.bootstrap().unwrap();
        repository
    }

    #[test]
    fn hashed_file_is_written_to_the_store() {
        let dir = TempDir::new().unwrap();
        dir.child("doc.txt").write_str("what is up, doc?").unwrap();
        let repository = initialized(&dir);

        repository.hash_object("doc.txt").unwrap();

        let oid = ObjectId::try_parse("bd9dbf5aae1a3862dd1526723246b20206e5fc37").unwrap();
        assert_eq!(
            repository.database().load(&oid).unwrap().as_ref(),
            b"what is up, doc?"
        );
        assert_eq!(std::fs::read(repository.index().path()).unwrap(), b"");
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let dir = TempDir::new().unwrap();
        let repository = initialized(&dir);

        let error = repository.hash_object("missing.txt").unwrap_err();

        assert!(matches!(
            error.downcast_ref::<JitError>(),
            Some(JitError::NotFound { .. })
        ));
    }
}
