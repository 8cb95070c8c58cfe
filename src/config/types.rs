//! Core configuration types.
//! - Config holds the per-invocation settings built from argv.
//! - ConflictPolicy / TransferMode select the engine's behaviour.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Program-defined verbosity levels exposed to users.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Warnings and errors (default)
    #[default]
    Normal,
    /// Every transfer decision
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" | "warn" => Some(LogLevel::Normal),
            "info" | "verbose" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// How conflicts with existing destination entries are settled.
/// Chosen once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Ask the operator for every conflict.
    #[default]
    Interactive,
    /// Keep whatever already exists.
    NoReplace,
    /// Source wins for same-kind collisions; kind mismatches are errors.
    Replace,
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConflictPolicy::Interactive => "interactive",
            ConflictPolicy::NoReplace => "no-replace",
            ConflictPolicy::Replace => "replace",
        })
    }
}

/// Whether sources survive the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    Copy,
    Move,
}

impl TransferMode {
    /// Command name bound to this mode.
    pub fn command_name(self) -> &'static str {
        match self {
            TransferMode::Copy => "merge-cp",
            TransferMode::Move => "merge-mv",
        }
    }

    /// What happens to a single file in this mode ("copy" / "move").
    pub fn verb(self) -> &'static str {
        match self {
            TransferMode::Copy => "copy",
            TransferMode::Move => "move",
        }
    }
}

/// Runtime configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: TransferMode,
    pub policy: ConflictPolicy,
    /// If true, plan and print actions but do not modify the filesystem
    pub dry_run: bool,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to an additional log file
    pub log_file: Option<PathBuf>,
    /// Emit logs as JSON
    pub json: bool,
}

impl Config {
    /// Construct a Config for `mode`/`policy`; other fields use defaults.
    pub fn new(mode: TransferMode, policy: ConflictPolicy) -> Self {
        Self {
            mode,
            policy,
            dry_run: false,
            log_level: LogLevel::default(),
            log_file: None,
            json: false,
        }
    }
}
