//! With no --replace/--no-replace and no terminal on stdin, nothing may be overwritten.
mod common;

use common::{build, expect, flat, merge_cp, merge_mv, snapshot};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn file_conflict_without_terminal_fails_the_invocation() {
    let td = tempdir().unwrap();
    let first = td.path().join("first");
    let second = td.path().join("second");
    let dest = td.path().join("D");
    build(&first, &[("a.txt", Some("new")), ("b.txt", Some("b"))]);
    build(&second, &[("c.txt", Some("c"))]);
    build(&dest, &[("a.txt", Some("old"))]);

    merge_cp()
        .arg(flat(&first))
        .arg(flat(&second))
        .arg(&dest)
        .write_stdin("y\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no terminal"));

    // planning stopped before anything was written, and `second` never ran
    assert_eq!(snapshot(&dest), expect(&[("a.txt", Some("old"))]));
}

#[test]
fn kind_mismatch_without_terminal_is_skipped() {
    let td = tempdir().unwrap();
    let src = td.path().join("S");
    let dest = td.path().join("D");
    build(&src, &[("a.txt", Some("a")), ("clash/inner", Some("i"))]);
    build(&dest, &[("clash", Some("file"))]);

    merge_cp().arg(flat(&src)).arg(&dest).write_stdin("").assert().success();

    assert_eq!(
        snapshot(&dest),
        expect(&[("a.txt", Some("a")), ("clash", Some("file"))])
    );
}

#[test]
fn conflict_free_merge_needs_no_terminal() {
    let td = tempdir().unwrap();
    let src = td.path().join("S");
    let dest = td.path().join("D");
    build(&src, &[("sub/new.txt", Some("n"))]);
    build(&dest, &[("sub/old.txt", Some("o"))]);

    merge_mv().arg(flat(&src)).arg(&dest).write_stdin("").assert().success();

    assert!(!src.exists());
    assert_eq!(
        snapshot(&dest),
        expect(&[("sub", None), ("sub/new.txt", Some("n")), ("sub/old.txt", Some("o"))])
    );
}
