//! Core library for `merge-cp` / `merge-mv`.
//!
//! Recursively copies or moves files and directories into a destination tree,
//! merging with whatever is already there. Conflicts are decided per entry by a
//! policy (replace, keep, or ask), and the whole tree is planned before anything
//! on disk changes.
//!
//! Layers, bottom-up: `classify` -> `resolver` -> `merge` -> `fs_ops` -> `orchestrator`.

pub mod app;
pub mod classify;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod logging;
pub mod merge;
pub mod orchestrator;
pub mod output;
pub mod platform;
pub mod probe;
pub mod resolver;
pub mod shutdown;

pub use classify::{EntryKind, PathDescriptor, classify};
pub use config::{Config, ConflictPolicy, LogLevel, TransferMode};
pub use errors::MergeError;
pub use merge::{MergeReport, MergeTask, RunSummary, TreeMerger};
pub use probe::{FixedProbe, TerminalProbe};
pub use resolver::{Action, Answer, Probe, Prompt, resolve};
