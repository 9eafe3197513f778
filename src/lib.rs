//! Jit: a minimal content-addressable object store and staging index.
//!
//! - `areas`: the on-disk components (object database, index, workspace, refs)
//! - `artifacts`: value types and their encodings (object ids, blobs, index entries)
//! - `commands`: operations composed on top of the areas
//! - `config`: repository root resolution
//! - `errors`: the typed error taxonomy shared by every component

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod errors;
