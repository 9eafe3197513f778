//! Porcelain commands (user-facing operations)
//!
//! - `init`: bootstrap a new repository
//! - `add`: store files as objects and stage them

pub mod add;
pub mod init;
