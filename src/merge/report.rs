//! Per-source and per-invocation results.

use std::path::PathBuf;

use crate::errors::MergeError;

use super::plan::MergeTask;

/// Counters for one executed source.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub files_transferred: usize,
    pub dirs_created: usize,
    /// Files or whole directories relocated by a single rename.
    pub renamed: usize,
    pub skipped: usize,
    /// Non-fatal problems (source cleanup failures, skipped links).
    pub warnings: Vec<String>,
}

impl MergeReport {
    pub fn absorb(&mut self, other: &MergeReport) {
        self.files_transferred += other.files_transferred;
        self.dirs_created += other.dirs_created;
        self.renamed += other.renamed;
        self.skipped += other.skipped;
        self.warnings.extend(other.warnings.iter().cloned());
    }
}

/// A source that was planned (and, unless dry-run, executed) without error.
#[derive(Debug)]
pub struct SourceReport {
    pub source: PathBuf,
    pub target: PathBuf,
    pub plan: MergeTask,
    pub report: MergeReport,
}

/// Everything that happened in one invocation.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub completed: Vec<SourceReport>,
    pub failures: Vec<(PathBuf, MergeError)>,
    /// Sources that did not exist; reported as warnings only.
    pub missing: Vec<PathBuf>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn totals(&self) -> MergeReport {
        let mut total = MergeReport::default();
        for done in &self.completed {
            total.absorb(&done.report);
        }
        total
    }
}
