//! Metadata preservation for copies.
//! - Copies atime/mtime and, on Unix, the permission bits (Windows: readonly flag).
//! - With the `xattrs` feature, extended attributes are copied too.
//! - Best-effort: failures are logged and never fail the copy.

use filetime::{FileTime, set_file_times};
use std::fs;
use std::path::Path;
use tracing::{trace, warn};

/// Apply `src_meta`'s timestamps and permissions to `dest`.
pub(crate) fn preserve_metadata(dest: &Path, src_meta: &fs::Metadata) {
    let mtime = FileTime::from_last_modification_time(src_meta);
    let atime = FileTime::from_last_access_time(src_meta);
    if let Err(e) = set_file_times(dest, atime, mtime) {
        warn!(path = %dest.display(), error = %e, "failed to set atime/mtime on destination");
    } else {
        trace!(path = %dest.display(), "set atime/mtime on destination");
    }

    preserve_permissions(dest, src_meta);
}

/// Mirror only the permission bits (Unix mode / Windows readonly).
pub(crate) fn preserve_permissions(dest: &Path, src_meta: &fs::Metadata) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = src_meta.permissions().mode() & 0o7777;
        if let Err(e) = fs::set_permissions(dest, fs::Permissions::from_mode(mode)) {
            warn!(path = %dest.display(), mode = format!("{:o}", mode), error = %e, "failed to set permissions on destination");
        }
    }
    #[cfg(not(unix))]
    {
        if let Ok(meta) = fs::metadata(dest) {
            let mut perms = meta.permissions();
            perms.set_readonly(src_meta.permissions().readonly());
            if let Err(e) = fs::set_permissions(dest, perms) {
                warn!(path = %dest.display(), error = %e, "failed to set readonly attribute on destination");
            }
        }
    }
}

/// Only the modification time; used on directories once their children are in place.
pub(crate) fn preserve_mtime(dest: &Path, src_meta: &fs::Metadata) {
    let mtime = FileTime::from_last_modification_time(src_meta);
    if let Err(e) = filetime::set_file_mtime(dest, mtime) {
        warn!(path = %dest.display(), error = %e, "failed to set mtime on destination");
    }
}

/// Copy extended attributes. No-op without the `xattrs` feature.
pub(crate) fn preserve_xattrs(src: &Path, dest: &Path) {
    #[cfg(feature = "xattrs")]
    {
        let names = match xattr::list(src) {
            Ok(names) => names,
            Err(e) => {
                warn!(src = %src.display(), error = %e, "failed to list xattrs; continuing");
                return;
            }
        };
        for name in names {
            let name_disp = name.to_string_lossy().into_owned();
            match xattr::get(src, &name) {
                Ok(value) => {
                    let value = value.unwrap_or_default();
                    if let Err(e) = xattr::set(dest, &name, &value) {
                        warn!(dest = %dest.display(), xattr = %name_disp, error = %e, "failed to set xattr on destination");
                    } else {
                        trace!(dest = %dest.display(), xattr = %name_disp, size = value.len(), "preserved xattr");
                    }
                }
                Err(e) => {
                    warn!(src = %src.display(), xattr = %name_disp, error = %e, "failed to read xattr from source");
                }
            }
        }
    }
    #[cfg(not(feature = "xattrs"))]
    {
        let _ = (src, dest);
    }
}
