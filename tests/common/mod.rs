//! Shared helpers for the integration tests.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use assert_cmd::Command;

/// One entry of a snapshot: a directory, or a file with its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Dir,
    File(String),
}

/// Relative path -> node for everything under `root` (root itself excluded).
/// Missing roots snapshot as empty.
pub fn snapshot(root: &Path) -> BTreeMap<String, Node> {
    let mut out = BTreeMap::new();
    if !root.exists() {
        return out;
    }
    for entry in walkdir::WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.unwrap();
        let rel = entry
            .path()
            .strip_prefix(root)
            .unwrap()
            .to_string_lossy()
            .replace('\\', "/");
        let node = if entry.file_type().is_dir() {
            Node::Dir
        } else {
            Node::File(fs::read_to_string(entry.path()).unwrap())
        };
        out.insert(rel, node);
    }
    out
}

/// Build a tree from `(relative path, content)` pairs; `None` content makes a directory.
pub fn build(root: &Path, entries: &[(&str, Option<&str>)]) {
    fs::create_dir_all(root).unwrap();
    for (rel, content) in entries {
        let p = root.join(rel);
        match content {
            Some(text) => {
                fs::create_dir_all(p.parent().unwrap()).unwrap();
                fs::write(&p, text).unwrap();
            }
            None => fs::create_dir_all(&p).unwrap(),
        }
    }
}

/// Expected snapshot written the same way as `build`.
pub fn expect(entries: &[(&str, Option<&str>)]) -> BTreeMap<String, Node> {
    entries
        .iter()
        .map(|(rel, content)| {
            let node = match content {
                Some(text) => Node::File(text.to_string()),
                None => Node::Dir,
            };
            (rel.to_string(), node)
        })
        .collect()
}

pub fn merge_cp() -> Command {
    Command::new(env!("CARGO_BIN_EXE_merge-cp"))
}

pub fn merge_mv() -> Command {
    Command::new(env!("CARGO_BIN_EXE_merge-mv"))
}

/// `path` plus a trailing separator, as a shell user would type `dir/`.
pub fn flat(path: &Path) -> std::ffi::OsString {
    let mut s = path.as_os_str().to_os_string();
    s.push(std::path::MAIN_SEPARATOR_STR);
    s
}
