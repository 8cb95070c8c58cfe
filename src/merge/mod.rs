//! Tree merging: map one source onto its destination, plan every entry, then apply.

mod exec;
mod plan;
mod report;
mod target;

use tracing::debug;

use crate::classify::PathDescriptor;
use crate::config::{Config, ConflictPolicy, TransferMode};
use crate::errors::MergeError;
use crate::resolver::Probe;

pub use exec::Executor;
pub use plan::{MergeTask, Planner};
pub use report::{MergeReport, RunSummary, SourceReport};
pub use target::{effective_destination, ensure_not_into_itself, is_same_file};

/// Merges one classified source at a time into a destination.
pub struct TreeMerger<'p> {
    mode: TransferMode,
    policy: ConflictPolicy,
    dry_run: bool,
    probe: &'p mut dyn Probe,
}

impl<'p> TreeMerger<'p> {
    pub fn new(config: &Config, probe: &'p mut dyn Probe) -> Self {
        Self {
            mode: config.mode,
            policy: config.policy,
            dry_run: config.dry_run,
            probe,
        }
    }

    /// Merge `src` (which must exist) into `dest`. In dry-run mode the plan is
    /// returned with an empty report and nothing is touched.
    pub fn merge(&mut self, src: &PathDescriptor, dest: &PathDescriptor) -> Result<SourceReport, MergeError> {
        if !src.kind.exists() {
            return Err(MergeError::SourceNotFound(src.path.clone()));
        }
        let target = effective_destination(src, dest)?;
        if src.is_dir() {
            ensure_not_into_itself(&src.path, &target)?;
        }
        debug!(src = %src.path.display(), target = %target.display(), flatten = src.trailing_separator, "Planning merge");

        let plan = Planner::new(self.policy, &mut *self.probe).plan(&src.path, src.kind, &target)?;
        let report = if self.dry_run {
            MergeReport::default()
        } else {
            Executor::new(self.mode).run(&plan)?
        };

        Ok(SourceReport {
            source: src.path.clone(),
            target,
            plan,
            report,
        })
    }
}
