//! Core repository components
//!
//! - `database`: content-addressed object storage
//! - `index`: append-only staging index
//! - `refs`: HEAD and the `refs/` skeleton
//! - `repository`: wires the areas to one repository root
//! - `workspace`: working tree file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
