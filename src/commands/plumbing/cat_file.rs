use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;

/// What `cat-file` prints about an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    /// Raw payload bytes
    Pretty,
    /// Object kind from the header
    Type,
    /// Payload size from the header
    Size,
}

impl Repository {
    pub fn cat_file(&self, object_id: &str, mode: CatFileMode, verify: bool) -> anyhow::Result<()> {
        self.require_initialized()?;

        let object_id = ObjectId::try_parse(object_id)?;

        if verify {
            self.database().verify(&object_id)?;
        }

        match mode {
            CatFileMode::Pretty if verify => {
                // a verified read also checks the header against the payload
                let blob = self.database().parse_object_as_blob(&object_id)?;
                self.writer().write_all(&blob.into_content())?;
            }
            CatFileMode::Pretty => {
                let content = self.database().load(&object_id)?;
                self.writer().write_all(&content)?;
            }
            CatFileMode::Type => {
                let header = self.database().read_header(&object_id)?;
                writeln!(self.writer(), "{}", header.object_type)?;
            }
            CatFileMode::Size => {
                let header = self.database().read_header(&object_id)?;
                writeln!(self.writer(), "{}", header.size)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::CatFileMode;
    use crate::areas::repository::Repository;
    use crate::artifacts::objects::blob::Blob;
    use crate::config::Config;
    use crate::errors::JitError;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    /// Captures command output so tests can inspect it
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn initialized(dir: &TempDir) -> (Repository, SharedBuffer) {
        let output = SharedBuffer::default();
        let repository =
            Repository::new(Config::new(dir.path()), Box::new(output.clone())).unwrap();
        repository.bootstrap().unwrap();
        (repository, output)
    }

    #[rstest]
    #[case::pretty(CatFileMode::Pretty, false, b"a\0b".as_slice())]
    #[case::pretty_verified(CatFileMode::Pretty, true, b"a\0b".as_slice())]
    #[case::kind(CatFileMode::Type, false, b"blob\n".as_slice())]
    #[case::size(CatFileMode::Size, true, b"3\n".as_slice())]
    fn stored_blob_is_printed(
        #[case] mode: CatFileMode,
        #[case] verify: bool,
        #[case] expected: &[u8],
    ) {
        let dir = TempDir::new().unwrap();
        let (repository, output) = initialized(&dir);
        let oid = repository.database().store(&Blob::new(&b"a\0b"[..])).unwrap();

        repository.cat_file(oid.as_ref(), mode, verify).unwrap();

        assert_eq!(output.0.lock().unwrap().as_slice(), expected);
    }

    #[test]
    fn tampered_object_fails_only_when_verified() {
        let dir = TempDir::new().unwrap();
        let (repository, output) = initialized(&dir);
        let oid = repository.database().store(&Blob::new(&b"real"[..])).unwrap();
        std::fs::write(repository.database().object_path(&oid), b"blob 4\0fake").unwrap();

        repository
            .cat_file(oid.as_ref(), CatFileMode::Pretty, false)
            .unwrap();
        let error = repository
            .cat_file(oid.as_ref(), CatFileMode::Pretty, true)
            .unwrap_err();

        assert_eq!(output.0.lock().unwrap().as_slice(), b"fake");
        assert!(matches!(
            error.downcast_ref::<JitError>(),
            Some(JitError::ChecksumMismatch { .. })
        ));
    }

    #[rstest]
    #[case::short("abc")]
    #[case::not_hex("zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz")]
    fn invalid_object_ids_are_rejected(#[case] oid: &str) {
        let dir = TempDir::new().unwrap();
        let (repository, _) = initialized(&dir);

        let error = repository
            .cat_file(oid, CatFileMode::Pretty, false)
            .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<JitError>(),
            Some(JitError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn unknown_object_is_not_found() {
        let dir = TempDir::new().unwrap();
        let (repository, _) = initialized(&dir);

        let error = repository
            .cat_file(
                "0123456789abcdef0123456789abcdef01234567",
                CatFileMode::Type,
                false,
            )
            .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<JitError>(),
            Some(JitError::NotFound { .. })
        ));
    }
}
