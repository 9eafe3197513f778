#![allow(dead_code)]

pub mod command;
pub mod file;

/// Matches one `<mode> <oid> <path>` index line
pub const INDEX_LINE_PATTERN: &str = r"^(100644|100755) [0-9a-f]{40} .+$";

/// Git's blob id for `content`, used as an independent oracle
pub fn expected_blob_id(content: &[u8]) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(format!("blob {}\0", content.len()).as_bytes());
    hasher.update(content);

    format!("{:x}", hasher.finalize())
}

/// Location of an object file under the default repository directory
pub fn object_path(dir: &std::path::Path, oid: &str) -> std::path::PathBuf {
    dir.join(".jit").join("objects").join(&oid[..2]).join(&oid[2..])
}
