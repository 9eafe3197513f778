//! Command implementations
//!
//! - `plumbing`: low-level object and index access (hash-object, cat-file, ls-files)
//! - `porcelain`: user-facing workflows (init, add)
//!
//! Each command is an `impl Repository` block; commands print to the
//! repository writer and return `anyhow::Result`, while the typed operations
//! they are built on return `crate::errors::Result`.

pub mod plumbing;
pub mod porcelain;
