//! Atomic rename helper.
//! - On Windows, a regular file at the destination is removed first (MoveFile
//!   doesn't overwrite).
//! - On Unix, the destination directory is fsynced after the rename (best-effort).
//!
//! Errors are returned raw so callers can tell EXDEV apart from real failures.

use std::fs;
use std::io;
use std::path::Path;

use super::util::fsync_dir;

pub(super) fn rename_atomic(src: &Path, dst: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        if let Ok(meta) = fs::symlink_metadata(dst) {
            if !meta.is_dir() {
                if let Err(e) = fs::remove_file(dst) {
                    if e.kind() != io::ErrorKind::NotFound {
                        return Err(e);
                    }
                }
            }
        }
    }

    fs::rename(src, dst)?;

    if let Some(parent) = dst.parent() {
        // A failed directory fsync must not turn a completed rename into an error.
        let _ = fsync_dir(parent);
    }
    Ok(())
}
