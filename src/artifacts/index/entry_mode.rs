use crate::errors::{JitError, Result};
use is_executable::IsExecutable;
use std::fs::Metadata;
use std::path::Path;

/// Mode recorded for a staged file
///
/// Permission bits are normalized the way git does: any execute bit makes
/// the file executable, everything else is a regular file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FileMode {
    #[default]
    Regular,
    Executable,
}

impl FileMode {
    pub const REGULAR: u32 = 0o100644;
    pub const EXECUTABLE: u32 = 0o100755;

    pub fn as_u32(&self) -> u32 {
        match self {
            FileMode::Regular => Self::REGULAR,
            FileMode::Executable => Self::EXECUTABLE,
        }
    }

    /// Six-digit zero-padded octal, as written to the index
    pub fn to_octal(&self) -> String {
        format!("{:06o}", self.as_u32())
    }

    pub fn parse_octal(mode: &str) -> Result<Self> {
        if mode.len() != 6 {
            return Err(JitError::invalid_argument(format!(
                "mode {mode:?} is not 6 octal digits"
            )));
        }
        let raw = u32::from_str_radix(mode, 8)
            .map_err(|_| JitError::invalid_argument(format!("mode {mode:?} is not octal")))?;

        Self::try_from(raw)
    }
}

impl TryFrom<u32> for FileMode {
    type Error = JitError;

    fn try_from(mode: u32) -> Result<Self> {
        match mode {
            Self::REGULAR => Ok(FileMode::Regular),
            Self::EXECUTABLE => Ok(FileMode::Executable),
            _ => Err(JitError::invalid_argument(format!(
                "unsupported file mode {mode:o}"
            ))),
        }
    }
}

impl TryFrom<(&Path, &Metadata)> for FileMode {
    type Error = JitError;

    fn try_from((file_path, metadata): (&Path, &Metadata)) -> Result<Self> {
        if !metadata.is_file() {
            return Err(JitError::invalid_argument(format!(
                "{} is not a regular file",
                file_path.display()
            )));
        }

        match file_path.is_executable() {
            true => Ok(FileMode::Executable),
            false => Ok(FileMode::Regular),
        }
    }
}

impl std::fmt::Display for FileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:06o}", self.as_u32())
    }
}
