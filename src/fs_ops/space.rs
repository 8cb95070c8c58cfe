//! Free-space check before a copy.

use std::path::Path;
use tracing::debug;

use crate::errors::MergeError;
use crate::platform::free_space_bytes;

/// Fail with `InsufficientSpace` when `dst_dir`'s filesystem cannot hold `required` bytes.
/// If free space cannot be determined the copy is attempted anyway.
pub(super) fn ensure_space_for_copy(dst_dir: &Path, required: u64) -> Result<(), MergeError> {
    let available = match free_space_bytes(dst_dir) {
        Ok(n) => n,
        Err(e) => {
            debug!(dir = %dst_dir.display(), error = %e, "free space unknown; skipping check");
            return Ok(());
        }
    };
    if required > available {
        return Err(MergeError::InsufficientSpace {
            required,
            available,
            dest: dst_dir.to_path_buf(),
        });
    }
    Ok(())
}
