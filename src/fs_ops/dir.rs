//! Directory-level operations used by the tree merger.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

use crate::classify::EntryKind;
use crate::errors::MergeError;
use crate::platform;

use super::atomic::rename_atomic;
use super::metadata;
use super::util::{is_cross_device, is_occupied};

/// Create one directory level. The parent must exist.
pub fn create_dir(dest: &Path) -> Result<(), MergeError> {
    match fs::create_dir(dest) {
        Ok(()) => {
            debug!(path = %dest.display(), "Created directory");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dest.is_dir() => Ok(()),
        Err(e) => Err(MergeError::from_io("create directory", dest, e)),
    }
}

/// Give a freshly created directory its source's permissions and mtime.
/// Runs after the children are written so a read-only source mode cannot block them.
pub fn finish_dir(dest: &Path, src_meta: &fs::Metadata) {
    metadata::preserve_permissions(dest, src_meta);
    metadata::preserve_mtime(dest, src_meta);
}

/// Try to relocate a whole directory with one rename. `Ok(false)` means the caller
/// must fall back to per-entry transfer (different device, or destination occupied).
pub fn rename_dir(src: &Path, dest: &Path) -> Result<bool, MergeError> {
    let parent = dest.parent().unwrap_or(dest);
    if platform::same_device(src, parent) == Some(false) {
        return Ok(false);
    }
    match rename_atomic(src, dest) {
        Ok(()) => {
            info!(src = %src.display(), dest = %dest.display(), "Renamed directory atomically");
            Ok(true)
        }
        Err(e) if is_cross_device(&e) || is_occupied(&e) => {
            debug!(src = %src.display(), error = %e, "directory rename not possible; transferring entries");
            Ok(false)
        }
        Err(e) => Err(MergeError::from_io("rename directory", src, e)),
    }
}

/// Delete whatever currently occupies `path` so a different kind can take its place.
pub fn remove_obstruction(path: &Path, kind: EntryKind) -> Result<(), MergeError> {
    let res = match kind {
        EntryKind::Directory => fs::remove_dir_all(path),
        EntryKind::File => fs::remove_file(path),
        EntryKind::Missing => return Ok(()),
    };
    match res {
        Ok(()) => {
            info!(path = %path.display(), %kind, "Removed existing entry");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(MergeError::from_io("remove existing entry", path, e)),
    }
}

/// Remove a moved-out source directory if nothing was left behind in it.
/// Returns `Ok(false)` when it still holds skipped entries.
pub fn remove_source_dir_if_empty(path: &Path) -> io::Result<bool> {
    match fs::remove_dir(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(true),
        Err(e) if is_occupied(&e) => Ok(false),
        Err(e) => Err(e),
    }
}
