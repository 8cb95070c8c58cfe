//! Platform-specific helpers.
//! Hides OS differences (Unix/Windows) behind one API so the engine stays
//! platform-agnostic.

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::{free_space_bytes, open_log_file_secure_append, same_device};

#[cfg(windows)]
pub use windows::{free_space_bytes, open_log_file_secure_append, same_device};
