//! I/O error descriptions.
//!
//! Builds an op/path-aware message with a platform hint and the raw OS code, so a
//! failed transfer tells the operator what to check.

use std::io;
use std::path::Path;

/// Format `"<op> '<path>': <error>; <hint> [os code: N]"`.
pub fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        if let Some(hint) = os_hint(code) {
            msg.push_str("; ");
            msg.push_str(hint);
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else if let Some(hint) = kind_hint(e.kind()) {
        msg.push_str("; ");
        msg.push_str(hint);
    }

    msg
}

#[cfg(unix)]
fn os_hint(code: i32) -> Option<&'static str> {
    Some(match code {
        libc::EACCES | libc::EPERM => "permission denied, check ownership and write permissions",
        libc::EXDEV => "cross-filesystem, atomic rename not possible",
        libc::EBUSY => "resource busy, ensure no other process is using it",
        libc::ENOENT => "path not found, verify it exists",
        libc::EEXIST => "already exists",
        libc::ENOTEMPTY => "directory not empty",
        libc::ENOSPC => "insufficient space on device",
        libc::EROFS => "read-only filesystem, cannot write here",
        libc::ELOOP => "too many symbolic link levels, possible symlink cycle",
        libc::ENAMETOOLONG => "filename or path too long",
        libc::EMFILE => "process file descriptor limit reached",
        libc::ENFILE => "system-wide file table overflow",
        _ => return None,
    })
}

#[cfg(windows)]
fn os_hint(code: i32) -> Option<&'static str> {
    Some(match code {
        5 => "access denied, check permissions",
        17 => "not same device, cross-filesystem move",
        32 => "sharing violation, file is in use",
        2 | 3 => "path not found, verify it exists",
        80 | 183 => "already exists",
        112 => "insufficient disk space",
        19 => "write protected or read-only media",
        206 => "filename or path too long",
        4 => "too many open files",
        _ => return None,
    })
}

#[cfg(not(any(unix, windows)))]
fn os_hint(_code: i32) -> Option<&'static str> {
    None
}

fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied, check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found, verify it exists"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        _ => None,
    }
}
