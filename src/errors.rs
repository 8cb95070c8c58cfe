//! Typed error definitions for the merge engine.
//! Each variant maps to one failure mode the orchestrator reports per source.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::classify::EntryKind;
use crate::fs_ops::describe_io_error;

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Source path not found: {0}")]
    SourceNotFound(PathBuf),

    #[error(
        "Type conflict: cannot place {incoming_kind} '{incoming}' over existing {existing_kind} '{existing}'; remove the obstruction first"
    )]
    TypeConflict {
        incoming: PathBuf,
        incoming_kind: EntryKind,
        existing: PathBuf,
        existing_kind: EntryKind,
    },

    #[error("Interactive confirmation needed for '{0}' but no terminal is attached; use --replace or --no-replace")]
    InteractivePromptUnavailable(PathBuf),

    #[error("Permission denied on {path}: {context}")]
    PermissionDenied { path: PathBuf, context: String },

    #[error("Not found: {path}: {context}")]
    NotFound { path: PathBuf, context: String },

    #[error("I/O error on {path}: {context}")]
    Io {
        path: PathBuf,
        context: String,
        #[source]
        cause: io::Error,
    },

    #[error("Insufficient disk space for destination {dest}: need {required} bytes, have {available} bytes")]
    InsufficientSpace {
        required: u64,
        available: u64,
        dest: PathBuf,
    },

    #[error("Cannot merge directory '{src}' into itself ('{dest}')")]
    IntoItself { src: PathBuf, dest: PathBuf },

    #[error("Destination '{0}' must be a directory when several sources are given or it ends with a separator")]
    DestinationNotDirectory(PathBuf),

    #[error("Source path has no file name to nest under the destination: {0}")]
    NoFileName(PathBuf),

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl MergeError {
    /// Convert an io::Error from operation `op` on `path`, keeping the error kind
    /// visible in the variant.
    pub fn from_io(op: &str, path: &Path, e: io::Error) -> Self {
        let context = describe_io_error(op, path, &e);
        match e.kind() {
            io::ErrorKind::PermissionDenied => MergeError::PermissionDenied {
                path: path.to_path_buf(),
                context,
            },
            io::ErrorKind::NotFound => MergeError::NotFound {
                path: path.to_path_buf(),
                context,
            },
            _ => MergeError::Io {
                path: path.to_path_buf(),
                context,
                cause: e,
            },
        }
    }

    /// Adapter for `map_err`.
    pub fn io<'a>(op: &'a str, path: &'a Path) -> impl FnOnce(io::Error) -> MergeError + 'a {
        move |e| MergeError::from_io(op, path, e)
    }

    /// Stable numeric code for logs and exit diagnostics.
    pub fn code(&self) -> i32 {
        match self {
            MergeError::SourceNotFound(_) => 10,
            MergeError::TypeConflict { .. } => 20,
            MergeError::InteractivePromptUnavailable(_) => 21,
            MergeError::PermissionDenied { .. } => 30,
            MergeError::NotFound { .. } => 31,
            MergeError::Io { .. } => 32,
            MergeError::InsufficientSpace { .. } => 33,
            MergeError::IntoItself { .. } => 40,
            MergeError::DestinationNotDirectory(_) => 41,
            MergeError::NoFileName(_) => 42,
            MergeError::Interrupted => 130,
        }
    }

    /// Short label used as the `kind` field in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            MergeError::SourceNotFound(_) => "source_not_found",
            MergeError::TypeConflict { .. } => "type_conflict",
            MergeError::InteractivePromptUnavailable(_) => "prompt_unavailable",
            MergeError::PermissionDenied { .. } => "permission_denied",
            MergeError::NotFound { .. } => "not_found",
            MergeError::Io { .. } => "io",
            MergeError::InsufficientSpace { .. } => "insufficient_space",
            MergeError::IntoItself { .. } => "into_itself",
            MergeError::DestinationNotDirectory(_) => "destination_not_directory",
            MergeError::NoFileName(_) => "no_file_name",
            MergeError::Interrupted => "interrupted",
        }
    }

    /// Whether this failure stops the remaining sources of the invocation,
    /// not just the current one.
    pub fn is_fatal_for_invocation(&self) -> bool {
        matches!(
            self,
            MergeError::InteractivePromptUnavailable(_)
                | MergeError::Interrupted
                | MergeError::DestinationNotDirectory(_)
        )
    }
}
