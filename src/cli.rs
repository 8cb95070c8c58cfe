//! CLI definition and parsing, shared by `merge-cp` and `merge-mv`.
//!
//! Notes:
//! - Paths stay `OsString` so a trailing separator (flatten request) is never lost.
//! - --debug wins over --verbose, which wins over --log-level.

use clap::{Parser, ValueHint};
use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::types::{Config, ConflictPolicy, LogLevel, TransferMode};

/// Merge-aware recursive copy/move.
/// Without --replace or --no-replace every conflict is confirmed interactively.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Merge source trees into a destination, file by file"
)]
pub struct Args {
    /// One or more sources followed by the destination.
    /// A trailing separator on a source directory merges its contents instead of the directory itself.
    #[arg(value_name = "PATH", num_args = 2.., required = true, value_hint = ValueHint::AnyPath)]
    pub paths: Vec<OsString>,

    /// Overwrite existing files without asking.
    #[arg(long, conflicts_with = "no_replace", help = "Overwrite existing files without asking")]
    pub replace: bool,

    /// Never overwrite; existing entries win.
    #[arg(long, help = "Keep existing files; never overwrite")]
    pub no_replace: bool,

    /// Plan and print, change nothing.
    #[arg(
        short = 'n',
        long,
        visible_alias = "simulate",
        help = "Show what would be done, but do not modify files/directories"
    )]
    pub dry_run: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, value_parser = LogLevel::from_str, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<LogLevel>,

    /// Log every transfer decision (same as `--log-level info`).
    #[arg(short = 'v', long, help = "Log every transfer (shorthand for --log-level info)")]
    pub verbose: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Also append logs to this file.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn policy(&self) -> ConflictPolicy {
        if self.replace {
            ConflictPolicy::Replace
        } else if self.no_replace {
            ConflictPolicy::NoReplace
        } else {
            ConflictPolicy::Interactive
        }
    }

    /// Sources and destination, sanitized. `None` if fewer than two paths were given.
    pub fn split_paths(&self) -> Option<(Vec<OsString>, OsString)> {
        let (dest, sources) = self.paths.split_last()?;
        if sources.is_empty() {
            return None;
        }
        Some((
            sources.iter().map(|s| sanitize_arg(s)).collect(),
            sanitize_arg(dest),
        ))
    }

    /// Effective log level derived from flags.
    /// Precedence: --debug > --verbose > --log-level value > default.
    pub fn effective_log_level(&self) -> LogLevel {
        if self.debug {
            return LogLevel::Debug;
        }
        if self.verbose {
            return LogLevel::Info;
        }
        self.log_level.clone().unwrap_or_default()
    }

    pub fn to_config(&self, mode: TransferMode) -> Config {
        let mut cfg = Config::new(mode, self.policy());
        cfg.dry_run = self.dry_run;
        cfg.log_level = self.effective_log_level();
        cfg.log_file = self.log_file.clone();
        cfg.json = self.json;
        cfg
    }
}

/// Trim one matched pair of surrounding quotes left by PowerShell/CMD quoting mistakes.
/// Anything else, including a trailing separator, is kept byte for byte.
fn sanitize_arg(raw: &OsString) -> OsString {
    let Some(s) = raw.to_str() else {
        return raw.clone();
    };
    let quoted = s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')));
    if quoted {
        OsString::from(&s[1..s.len() - 1])
    } else {
        raw.clone()
    }
}

pub fn parse() -> Args {
    Args::parse()
}
