//! Root-package integration tests (§2 "Test tooling"), wired through an
//! explicit `[[test]]` entry in `Cargo.toml` rather than bare `tests/`
//! discovery: drive the built `egg` binary end to end rather than its
//! internal modules, since the root crate exposes no library target.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

fn egg_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_egg"))
}

fn write_script(dir: &Path, name: &str, source: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(source.as_bytes()).unwrap();
    path
}

#[test]
fn run_prints_program_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "hello.egg", r#"print("hello, world");"#);
    let output = egg_bin().arg("run").arg(&path).output().unwrap();
    assert!(output.status.success(), "{output:?}");
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello, world");
}

#[test]
fn run_reports_a_parse_error_and_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "broken.egg", "print(");
    let output = egg_bin().arg("run").arg(&path).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_subcommand_passes_matching_directives() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "directive.egg", "print(\"hi\"); ///>hi\n");
    let output = egg_bin().arg("test").arg(&path).output().unwrap();
    assert!(output.status.success(), "{output:?}");
}

#[test]
fn test_subcommand_fails_on_mismatched_directive() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "directive.egg", "print(\"hi\"); ///>bye\n");
    let output = egg_bin().arg("test").arg(&path).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn tokens_subcommand_dumps_non_trivia_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "tok.egg", "int x = 1;\n");
    let output = egg_bin().arg("tokens").arg(&path).output().unwrap();
    assert!(output.status.success(), "{output:?}");
    assert!(!String::from_utf8_lossy(&output.stdout).is_empty());
}

#[test]
#[serial_test::serial]
fn walks_a_fixture_directory_and_tests_each_script() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "a.egg", "print(\"a\"); ///>a\n");
    write_script(dir.path(), "b.egg", "print(\"b\"); ///>b\n");

    let mut checked = 0;
    for entry in walkdir::WalkDir::new(dir.path()).into_iter().filter_map(Result::ok) {
        if entry.path().extension().map(|ext| ext == "egg").unwrap_or(false) {
            let output = egg_bin().arg("test").arg(entry.path()).output().unwrap();
            assert!(output.status.success(), "{:?}: {output:?}", entry.path());
            checked += 1;
        }
    }
    assert_eq!(checked, 2);
}
