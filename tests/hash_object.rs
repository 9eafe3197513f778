use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteBin, FileWriteStr, PathChild};
use common::command::{init_repository_dir, jit_hash_object, repository_dir, run_jit_command};
use common::{expected_blob_id, object_path};
use fake::Fake;
use fake::faker::lorem::en::{Word, Words};
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn write_blob_object_successfully(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let file_name = format!("{}.txt", Word().fake::<String>());
    let file_content = Words(5..10).fake::<Vec<String>>().join(" ");
    init_repository_dir.child(&file_name).write_str(&file_content)?;

    run_jit_command(init_repository_dir.path(), &["hash-object", &file_name])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[0-9a-f]{40}\n$")?)
        .stdout(predicate::str::contains(expected_blob_id(
            file_content.as_bytes(),
        )));

    Ok(())
}

#[rstest]
fn object_file_holds_the_framed_content(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("hello.txt").write_str("hello world\n")?;

    let oid = jit_hash_object(init_repository_dir.path(), "hello.txt");

    assert_eq!(oid, "3b18e512dba79e4c8300dd08aeb37f8e728b8dad");
    assert_eq!(
        std::fs::read(object_path(init_repository_dir.path(), &oid))?,
        b"blob 12\0hello world\n"
    );

    Ok(())
}

#[rstest]
fn empty_and_binary_files_are_stored(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("empty").write_binary(b"")?;
    init_repository_dir.child("binary").write_binary(b"\0\xff\0jit")?;

    assert_eq!(
        jit_hash_object(init_repository_dir.path(), "empty"),
        "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391"
    );
    assert_eq!(
        jit_hash_object(init_repository_dir.path(), "binary"),
        expected_blob_id(b"\0\xff\0jit")
    );

    Ok(())
}

#[rstest]
fn hashing_the_same_content_twice_writes_one_object(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("a.txt").write_str("same")?;
    init_repository_dir.child("b.txt").write_str("same")?;

    let first = jit_hash_object(init_repository_dir.path(), "a.txt");
    let second = jit_hash_object(init_repository_dir.path(), "b.txt");

    assert_eq!(first, second);
    let objects = walkdir::WalkDir::new(init_repository_dir.path().join(".jit/objects"))
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .count();
    assert_eq!(objects, 1);

    Ok(())
}

#[rstest]
fn hashing_a_missing_file_fails(init_repository_dir: TempDir) {
    run_jit_command(init_repository_dir.path(), &["hash-object", "missing.txt"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("missing.txt"));
}

#[rstest]
fn hashing_outside_a_repository_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    repository_dir.child("a.txt").write_str("a")?;

    run_jit_command(repository_dir.path(), &["hash-object", "a.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    Ok(())
}
