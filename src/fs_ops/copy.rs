//! Safe copy-and-rename:
//! - copies into a hidden temp file next to the destination
//! - applies the source's metadata to the temp file
//! - renames the temp file over the final name
//!
//! A reader therefore sees either no file, the old file, or the complete new one;
//! an interrupted copy only ever leaves a `.merge_mv.*.tmp` sibling behind, and
//! that is removed on any error we can observe.

use std::fs;
use std::path::Path;

use crate::errors::MergeError;

use super::atomic::rename_atomic;
use super::{io_copy, metadata, space, util};

/// Copy `src` to `dest` via a temp sibling. `dest`'s parent must already exist.
/// Returns bytes copied.
pub fn safe_copy_and_rename(src: &Path, dest: &Path) -> Result<u64, MergeError> {
    let dest_dir = dest
        .parent()
        .ok_or_else(|| MergeError::NoFileName(dest.to_path_buf()))?;
    if !dest_dir.is_dir() {
        return Err(MergeError::NotFound {
            path: dest_dir.to_path_buf(),
            context: format!("destination parent of '{}' does not exist", dest.display()),
        });
    }

    let src_meta = fs::metadata(src).map_err(MergeError::io("stat source", src))?;
    space::ensure_space_for_copy(dest_dir, src_meta.len())?;

    let tmp = util::unique_temp_path(dest_dir);
    let bytes = match io_copy::copy_streaming(src, &tmp) {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(MergeError::from_io("copy to temporary file", &tmp, e));
        }
    };

    metadata::preserve_metadata(&tmp, &src_meta);
    metadata::preserve_xattrs(src, &tmp);

    if let Err(e) = rename_atomic(&tmp, dest) {
        let _ = fs::remove_file(&tmp);
        return Err(MergeError::from_io("rename temporary file into place", dest, e));
    }

    Ok(bytes)
}
