//! Plumbing commands (low-level operations)
//!
//! - `hash-object`: store a file as a blob and print its id
//! - `cat-file`: print an object's payload, kind or size
//! - `ls-files`: list the staged state of the index

pub mod cat_file;
pub mod hash_object;
pub mod ls_files;
