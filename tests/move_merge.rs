mod common;

use common::{build, expect, flat, merge_mv, snapshot};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn move_into_missing_destination_removes_source() {
    let td = tempdir().unwrap();
    let src = td.path().join("S");
    let dest = td.path().join("D");
    build(&src, &[("folder1/file1.txt", Some("1")), ("file4.txt", Some("4"))]);
    let before = snapshot(&src);

    merge_mv().arg(&src).arg(&dest).assert().success();

    assert!(!src.exists());
    assert_eq!(snapshot(&dest), before);
}

#[test]
fn move_merges_into_existing_tree() {
    let td = tempdir().unwrap();
    let src = td.path().join("S");
    let dest = td.path().join("D");
    build(&src, &[("a.txt", Some("new")), ("sub/b.txt", Some("b"))]);
    build(&dest, &[("a.txt", Some("old")), ("sub/c.txt", Some("c"))]);

    merge_mv().arg("--replace").arg(flat(&src)).arg(&dest).assert().success();

    assert!(!src.exists(), "emptied source tree is removed, root included");
    assert_eq!(
        snapshot(&dest),
        expect(&[
            ("a.txt", Some("new")),
            ("sub", None),
            ("sub/b.txt", Some("b")),
            ("sub/c.txt", Some("c")),
        ])
    );
}

#[test]
fn skipped_entries_stay_in_source() {
    let td = tempdir().unwrap();
    let src = td.path().join("S");
    let dest = td.path().join("D");
    build(&src, &[("a.txt", Some("new")), ("b.txt", Some("b"))]);
    build(&dest, &[("a.txt", Some("old"))]);

    merge_mv().arg("--no-replace").arg(flat(&src)).arg(&dest).assert().success();

    assert_eq!(snapshot(&src), expect(&[("a.txt", Some("new"))]));
    assert_eq!(
        snapshot(&dest),
        expect(&[("a.txt", Some("old")), ("b.txt", Some("b"))])
    );
}

#[test]
fn move_single_file_into_directory() {
    let td = tempdir().unwrap();
    let f = td.path().join("report.pdf");
    std::fs::write(&f, "pdf").unwrap();
    let dest = td.path().join("docs");
    build(&dest, &[]);

    merge_mv().arg(&f).arg(&dest).assert().success();

    assert!(!f.exists());
    assert_eq!(snapshot(&dest), expect(&[("report.pdf", Some("pdf"))]));
}

#[test]
fn move_type_conflict_keeps_both_trees() {
    let td = tempdir().unwrap();
    let src = td.path().join("S");
    let dest = td.path().join("D");
    build(&src, &[("x.txt", Some("x")), ("clash/deep.txt", Some("d"))]);
    build(&dest, &[("clash", Some("file"))]);
    let (src_before, dest_before) = (snapshot(&src), snapshot(&dest));

    merge_mv()
        .arg("--replace")
        .arg(flat(&src))
        .arg(&dest)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Type conflict"));

    assert_eq!(snapshot(&src), src_before);
    assert_eq!(snapshot(&dest), dest_before);
}

#[test]
fn move_dry_run_keeps_source() {
    let td = tempdir().unwrap();
    let src = td.path().join("S");
    build(&src, &[("a.txt", Some("a"))]);
    let before = snapshot(&src);
    let dest = td.path().join("D");

    merge_mv()
        .arg("--simulate")
        .arg(&src)
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("move"));

    assert_eq!(snapshot(&src), before);
    assert!(!dest.exists());
}

#[cfg(unix)]
#[test]
fn symlinks_inside_tree_are_left_behind() {
    let td = tempdir().unwrap();
    let src = td.path().join("S");
    build(&src, &[("real.txt", Some("r"))]);
    std::os::unix::fs::symlink(src.join("real.txt"), src.join("link")).unwrap();
    let dest = td.path().join("D");
    build(&dest, &[]);

    merge_mv()
        .arg(flat(&src))
        .arg(&dest)
        .assert()
        .success()
        .stderr(predicate::str::contains("symbolic link"));

    assert!(std::fs::symlink_metadata(src.join("link")).is_ok());
    assert!(std::fs::symlink_metadata(dest.join("link")).is_err());
    assert_eq!(std::fs::read_to_string(dest.join("real.txt")).unwrap(), "r");
}

#[test]
fn move_flattened_into_an_ancestor_is_refused() {
    let td = tempdir().unwrap();
    let outer = td.path().join("a");
    let src = outer.join("sub");
    build(&src, &[("f.txt", Some("outer")), ("sub/f.txt", Some("inner"))]);
    let before = snapshot(&outer);

    merge_mv()
        .arg("--replace")
        .arg(flat(&src))
        .arg(&outer)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("into itself"));
    assert_eq!(snapshot(&outer), before);
}

#[cfg(target_os = "linux")]
#[test]
fn move_across_filesystems_copies_then_removes_source() {
    use std::os::unix::fs::MetadataExt;

    let td = tempdir().unwrap();
    let Ok(other) = tempfile::tempdir_in("/dev/shm") else {
        eprintln!("skipping: /dev/shm not available");
        return;
    };
    let dev = |p: &std::path::Path| std::fs::metadata(p).unwrap().dev();
    if dev(td.path()) == dev(other.path()) {
        eprintln!("skipping: /dev/shm shares a device with the temp dir");
        return;
    }

    let src = other.path().join("S");
    build(&src, &[(".hidden", Some("h")), ("a.txt", Some("a")), ("sub/b.txt", Some("b"))]);
    let before = snapshot(&src);
    let dest = td.path().join("D");
    build(&dest, &[]);

    merge_mv().arg("--replace").arg(&src).arg(&dest).assert().success();

    assert!(!src.exists());
    assert_eq!(snapshot(&dest.join("S")), before);
}
