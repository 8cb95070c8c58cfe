//! Filesystem operations.
//! Everything that mutates the disk lives here; the merge planner above only reads.

mod atomic;
mod copy;
mod dir;
mod helpers;
mod io_copy;
mod metadata;
mod space;
mod transfer;
mod util;

pub use copy::safe_copy_and_rename;
pub use dir::{create_dir, finish_dir, remove_obstruction, remove_source_dir_if_empty, rename_dir};
pub use helpers::describe_io_error;
pub use transfer::{TransferMethod, TransferOutcome, transfer};
