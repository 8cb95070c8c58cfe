//! Single-file transfer.
//! Move prefers one atomic rename on the same device and falls back to
//! copy + remove-source across devices. Copy always goes through a temp file.

use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::config::TransferMode;
use crate::errors::MergeError;
use crate::platform;

use super::atomic::rename_atomic;
use super::copy::safe_copy_and_rename;
use super::util::is_cross_device;

/// How the content reached its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMethod {
    Renamed,
    Copied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub method: TransferMethod,
    /// Set when a cross-device move copied the content but could not delete the source.
    pub cleanup_warning: Option<String>,
}

impl TransferOutcome {
    fn renamed() -> Self {
        Self {
            method: TransferMethod::Renamed,
            cleanup_warning: None,
        }
    }

    fn copied(cleanup_warning: Option<String>) -> Self {
        Self {
            method: TransferMethod::Copied,
            cleanup_warning,
        }
    }
}

/// Transfer one regular file. The parent of `dest` must already exist; an existing
/// file at `dest` is replaced atomically.
pub fn transfer(src: &Path, dest: &Path, mode: TransferMode) -> Result<TransferOutcome, MergeError> {
    match mode {
        TransferMode::Copy => {
            let bytes = safe_copy_and_rename(src, dest)?;
            info!(src = %src.display(), dest = %dest.display(), bytes, "Copied file");
            Ok(TransferOutcome::copied(None))
        }
        TransferMode::Move => move_file(src, dest),
    }
}

fn move_file(src: &Path, dest: &Path) -> Result<TransferOutcome, MergeError> {
    let dest_dir = dest
        .parent()
        .ok_or_else(|| MergeError::NoFileName(dest.to_path_buf()))?;

    if platform::same_device(src, dest_dir) != Some(false) {
        match rename_atomic(src, dest) {
            Ok(()) => {
                info!(src = %src.display(), dest = %dest.display(), "Renamed file atomically");
                return Ok(TransferOutcome::renamed());
            }
            Err(e) if is_cross_device(&e) => {
                debug!(src = %src.display(), error = %e, "rename crossed devices; copying instead");
            }
            Err(e) => return Err(MergeError::from_io("rename", src, e)),
        }
    } else {
        debug!(src = %src.display(), dest = %dest.display(), "different devices; copying");
    }

    copy_then_remove(src, dest)
}

/// Cross-device move: copy, then delete the source. A source that cannot be
/// deleted leaves the transfer successful and yields a warning instead.
fn copy_then_remove(src: &Path, dest: &Path) -> Result<TransferOutcome, MergeError> {
    let bytes = safe_copy_and_rename(src, dest)?;
    match fs::remove_file(src) {
        Ok(()) => {
            info!(src = %src.display(), dest = %dest.display(), bytes, "Copied file and removed source");
            Ok(TransferOutcome::copied(None))
        }
        Err(e) => {
            let msg = format!(
                "'{}' was copied to '{}' but the source could not be removed: {}",
                src.display(),
                dest.display(),
                e
            );
            debug!(src = %src.display(), error = %e, "source cleanup failed after copy");
            Ok(TransferOutcome::copied(Some(msg)))
        }
    }
}
