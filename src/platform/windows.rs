//! Windows implementations of platform helpers (best-effort).

use std::fs::{File, OpenOptions};
use std::io;
use std::iter::once;
use std::os::windows::ffi::OsStrExt;
use std::path::{Component, Path, Prefix};

/// Open log file for appending. No ACL changes are made.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Bytes available to the caller on the volume holding `path`.
pub fn free_space_bytes(path: &Path) -> io::Result<u64> {
    use windows_sys::Win32::Storage::FileSystem::GetDiskFreeSpaceExW;
    let wide: Vec<u16> = path.as_os_str().encode_wide().chain(once(0)).collect();
    let mut free_avail: u64 = 0;
    let mut total: u64 = 0;
    let mut total_free: u64 = 0;
    let ok = unsafe { GetDiskFreeSpaceExW(wide.as_ptr(), &mut free_avail, &mut total, &mut total_free) };
    if ok == 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(free_avail)
}

/// Compare volume prefixes (drive letter or UNC share). Mount points inside a volume
/// are not detected; the rename fallback covers that case.
pub fn same_device(a: &Path, b: &Path) -> Option<bool> {
    let a = dunce::canonicalize(a).ok()?;
    let b = dunce::canonicalize(b).ok()?;
    Some(volume_of(&a)? == volume_of(&b)?)
}

fn volume_of(p: &Path) -> Option<String> {
    match p.components().next()? {
        Component::Prefix(prefix) => Some(match prefix.kind() {
            Prefix::Disk(d) | Prefix::VerbatimDisk(d) => (d as char).to_ascii_uppercase().to_string(),
            _ => prefix.as_os_str().to_string_lossy().to_ascii_lowercase(),
        }),
        _ => None,
    }
}
