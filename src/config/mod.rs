//! Config module.
//! The engine has no config file: everything here is filled from argv.

pub mod types;

pub use types::{Config, ConflictPolicy, LogLevel, TransferMode};
