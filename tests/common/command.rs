use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_jit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

pub fn run_jit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("jit").expect("Failed to find jit binary");
    cmd.env_remove("JIT_DIR");
    cmd.env_remove("JIT_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Run `hash-object` on `file` and return the printed id
pub fn jit_hash_object(dir: &Path, file: &str) -> String {
    let output = run_jit_command(dir, &["hash-object", file])
        .output()
        .expect("Failed to run hash-object");
    assert!(output.status.success(), "hash-object {file} failed");

    String::from_utf8(output.stdout)
        .expect("hash-object printed invalid UTF-8")
        .trim_end()
        .to_string()
}

pub fn read_index(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".jit").join("index")).expect("Failed to read index")
}
