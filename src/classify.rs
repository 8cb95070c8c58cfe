//! Path classification.
//! Turns a raw argument into a `PathDescriptor` before any filesystem resolution,
//! so the trailing separator (flatten vs. nest) survives.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// What occupies a path on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Missing,
    File,
    Directory,
}

impl EntryKind {
    pub fn exists(self) -> bool {
        !matches!(self, EntryKind::Missing)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntryKind::Missing => "missing path",
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
        })
    }
}

/// Classified command-line path. Built once per argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathDescriptor {
    /// Absolute (not canonicalized) path; symlinks are left as given.
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Only meaningful for directories: true means "merge my children" (flatten).
    pub trailing_separator: bool,
}

impl PathDescriptor {
    /// Final component used when nesting under a destination directory.
    /// Falls back to the canonical path for arguments like `.` or `..`.
    pub fn file_name(&self) -> Option<OsString> {
        if let Some(name) = self.path.file_name() {
            return Some(name.to_os_string());
        }
        dunce::canonicalize(&self.path)
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_os_string()))
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Classify a raw argument. Never fails: anything that cannot be stat'ed is `Missing`.
pub fn classify(raw: &OsStr) -> PathDescriptor {
    let trailing = has_trailing_separator(raw);
    let given = Path::new(raw);
    // components() drops the trailing separator and `.` segments; `..` is kept as given
    let path: PathBuf = std::path::absolute(given)
        .unwrap_or_else(|_| given.to_path_buf())
        .components()
        .collect();
    let kind = kind_of(&path);

    PathDescriptor {
        path,
        kind,
        // A plain file never flattens.
        trailing_separator: trailing && kind == EntryKind::Directory,
    }
}

/// Kind of whatever sits at `path`, following symlinks. A dangling link counts as a file
/// so it is still seen as an obstruction.
pub fn kind_of(path: &Path) -> EntryKind {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => EntryKind::Directory,
        Ok(_) => EntryKind::File,
        Err(_) => match fs::symlink_metadata(path) {
            Ok(_) => EntryKind::File,
            Err(_) => EntryKind::Missing,
        },
    }
}

/// True when the raw argument ends with a path separator (`/`, or `\` on Windows).
pub fn has_trailing_separator(raw: &OsStr) -> bool {
    let s = raw.to_string_lossy();
    if s.len() <= 1 {
        // "/" alone is the root, not a flatten request on an empty name
        return s == "/" || (cfg!(windows) && s == "\\");
    }
    s.ends_with('/') || (cfg!(windows) && s.ends_with('\\'))
}
