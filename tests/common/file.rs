use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct FileSpec {
    /// Path relative to the working tree
    pub path: PathBuf,
    pub content: String,
}

impl FileSpec {
    pub fn name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Write `files_count` files with random names and content under `dir`
///
/// Names carry their position so fake words can repeat without collisions.
pub fn write_generated_files(dir: &Path, sub_dir: &str, files_count: usize) -> Vec<FileSpec> {
    use fake::{
        Fake,
        faker::lorem::en::{Word, Words},
    };

    (0..files_count)
        .map(|i| {
            let file_name = format!("{i:02}_{}.txt", Word().fake::<String>());
            let file_content = Words(5..10).fake::<Vec<String>>().join(" ");

            let file_spec = FileSpec::new(Path::new(sub_dir).join(file_name), file_content);
            write_file(dir, &file_spec);

            file_spec
        })
        .collect::<Vec<_>>()
}

pub fn write_file(dir: &Path, file_spec: &FileSpec) {
    let path = dir.join(&file_spec.path);

    // make sure the parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", parent, e));
    }

    std::fs::write(&path, &file_spec.content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", path, e));
}
