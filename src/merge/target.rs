//! Where a source lands, and the guards that refuse nonsensical targets.

use std::path::{Path, PathBuf};

use crate::classify::PathDescriptor;
use crate::errors::MergeError;

/// Path the source's root maps to.
///
/// - file source: into `dest` when it is a directory, otherwise `dest` itself
/// - directory with a trailing separator: `dest` (children are flattened)
/// - directory without one: nested under `dest` when `dest` is an existing directory
///   with a different basename, otherwise `dest` itself
pub fn effective_destination(
    src: &PathDescriptor,
    dest: &PathDescriptor,
) -> Result<PathBuf, MergeError> {
    if src.is_dir() && src.trailing_separator {
        return Ok(dest.path.clone());
    }
    if !dest.is_dir() {
        return Ok(dest.path.clone());
    }

    let name = src
        .file_name()
        .ok_or_else(|| MergeError::NoFileName(src.path.clone()))?;
    if src.is_dir() && dest.file_name().as_deref() == Some(name.as_os_str()) {
        // `merge-cp photos backup/photos`: same basename, merge instead of nesting
        return Ok(dest.path.clone());
    }
    Ok(dest.path.join(name))
}

/// Refuse to place a directory inside its own subtree.
pub fn ensure_not_into_itself(src_dir: &Path, target: &Path) -> Result<(), MergeError> {
    let src_real = dunce::canonicalize(src_dir).map_err(MergeError::io("resolve source", src_dir))?;
    let target_real = resolve_lenient(target);
    if target_real.starts_with(&src_real) {
        return Err(MergeError::IntoItself {
            src: src_dir.to_path_buf(),
            dest: target.to_path_buf(),
        });
    }
    Ok(())
}

/// Whether two existing paths name the same file.
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        if let (Ok(ma), Ok(mb)) = (std::fs::metadata(a), std::fs::metadata(b)) {
            return ma.dev() == mb.dev() && ma.ino() == mb.ino();
        }
        false
    }
    #[cfg(not(unix))]
    {
        match (dunce::canonicalize(a), dunce::canonicalize(b)) {
            (Ok(ra), Ok(rb)) => ra == rb,
            _ => false,
        }
    }
}

/// Canonicalize the deepest existing ancestor and re-append the rest, so a target
/// that does not exist yet still resolves through symlinked parents.
pub(crate) fn resolve_lenient(path: &Path) -> PathBuf {
    let mut existing = path;
    let mut rest: Vec<&std::ffi::OsStr> = Vec::new();
    loop {
        if let Ok(real) = dunce::canonicalize(existing) {
            let mut out = real;
            for part in rest.iter().rev() {
                out.push(part);
            }
            return out;
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name);
                existing = parent;
            }
            _ => return path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use std::ffi::OsString;
    use std::fs;
    use tempfile::tempdir;

    fn flat(p: &Path) -> OsString {
        let mut s = p.as_os_str().to_os_string();
        s.push(std::path::MAIN_SEPARATOR_STR);
        s
    }

    #[test]
    fn directory_nests_under_existing_directory() {
        let td = tempdir().unwrap();
        let src = td.path().join("photos");
        let dest = td.path().join("backup");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dest).unwrap();

        let got = effective_destination(&classify(src.as_os_str()), &classify(dest.as_os_str())).unwrap();
        assert_eq!(got, dest.join("photos"));
    }

    #[test]
    fn trailing_separator_flattens() {
        let td = tempdir().unwrap();
        let src = td.path().join("photos");
        let dest = td.path().join("backup");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dest).unwrap();

        let got = effective_destination(&classify(&flat(&src)), &classify(dest.as_os_str())).unwrap();
        assert_eq!(got, dest);
    }

    #[test]
    fn same_basename_merges_instead_of_nesting() {
        let td = tempdir().unwrap();
        let src = td.path().join("a/photos");
        let dest = td.path().join("b/photos");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dest).unwrap();

        let got = effective_destination(&classify(src.as_os_str()), &classify(dest.as_os_str())).unwrap();
        assert_eq!(got, dest);
    }

    #[test]
    fn missing_destination_is_used_as_is() {
        let td = tempdir().unwrap();
        let src = td.path().join("photos");
        fs::create_dir_all(&src).unwrap();
        let dest = td.path().join("new");

        let got = effective_destination(&classify(src.as_os_str()), &classify(dest.as_os_str())).unwrap();
        assert_eq!(got, dest);
    }

    #[test]
    fn file_goes_inside_directory() {
        let td = tempdir().unwrap();
        let src = td.path().join("a.txt");
        fs::write(&src, "x").unwrap();
        let dest = td.path().join("a.txt.d");
        fs::create_dir(&dest).unwrap();

        let got = effective_destination(&classify(src.as_os_str()), &classify(dest.as_os_str())).unwrap();
        assert_eq!(got, dest.join("a.txt"));
    }

    #[test]
    fn into_itself_is_refused() {
        let td = tempdir().unwrap();
        let src = td.path().join("s");
        fs::create_dir_all(src.join("sub")).unwrap();

        let err = ensure_not_into_itself(&src, &src.join("sub/s")).unwrap_err();
        assert!(matches!(err, MergeError::IntoItself { .. }));
        assert!(ensure_not_into_itself(&src, &td.path().join("other/s")).is_ok());
    }

    #[test]
    fn sibling_with_common_prefix_is_not_inside() {
        let td = tempdir().unwrap();
        let src = td.path().join("data");
        fs::create_dir_all(&src).unwrap();
        assert!(ensure_not_into_itself(&src, &td.path().join("data2")).is_ok());
    }

    #[test]
    fn same_file_detection() {
        let td = tempdir().unwrap();
        let a = td.path().join("a");
        let b = td.path().join("b");
        fs::write(&a, "x").unwrap();
        fs::write(&b, "x").unwrap();
        assert!(is_same_file(&a, &a));
        assert!(!is_same_file(&a, &b));
    }
}
