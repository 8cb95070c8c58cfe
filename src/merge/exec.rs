//! Execution pass: apply a planned `MergeTask` tree in pre-order.

use std::fs;
use tracing::{debug, info};

use crate::classify::EntryKind;
use crate::config::TransferMode;
use crate::errors::MergeError;
use crate::fs_ops::{self, TransferMethod};
use crate::resolver::Action;
use crate::shutdown;

use super::plan::MergeTask;
use super::report::MergeReport;

pub struct Executor {
    mode: TransferMode,
    report: MergeReport,
}

impl Executor {
    pub fn new(mode: TransferMode) -> Self {
        Self {
            mode,
            report: MergeReport::default(),
        }
    }

    /// Apply `plan`. Stops at the first error; entries already transferred stay transferred.
    pub fn run(mut self, plan: &MergeTask) -> Result<MergeReport, MergeError> {
        self.execute(plan)?;
        Ok(self.report)
    }

    fn execute(&mut self, task: &MergeTask) -> Result<(), MergeError> {
        shutdown::checkpoint()?;
        match task.action {
            Action::Abort(reason) => Err(task.abort_error(reason)),
            Action::Skip => {
                self.skip(task);
                Ok(())
            }
            Action::MergeInto => {
                self.execute_children(task)?;
                self.remove_moved_source_dir(task);
                Ok(())
            }
            Action::Create | Action::Overwrite => {
                if task.action == Action::Overwrite && task.existing != task.kind {
                    fs_ops::remove_obstruction(&task.dest, task.existing)?;
                }
                match task.kind {
                    EntryKind::File => self.transfer_file(task),
                    EntryKind::Directory => self.create_tree(task),
                    EntryKind::Missing => Ok(()),
                }
            }
        }
    }

    fn execute_children(&mut self, task: &MergeTask) -> Result<(), MergeError> {
        for child in &task.children {
            self.execute(child)?;
        }
        Ok(())
    }

    fn skip(&mut self, task: &MergeTask) {
        self.report.skipped += 1;
        match task.note {
            Some(note) => {
                info!(src = %task.source.display(), reason = note, "Skipped");
                self.report
                    .warnings
                    .push(format!("skipped '{}': {}", task.source.display(), note));
            }
            None => {
                info!(src = %task.source.display(), dest = %task.dest.display(), existing = %task.existing, "Kept existing entry");
            }
        }
    }

    fn transfer_file(&mut self, task: &MergeTask) -> Result<(), MergeError> {
        let outcome = fs_ops::transfer(&task.source, &task.dest, self.mode)?;
        self.report.files_transferred += 1;
        if outcome.method == TransferMethod::Renamed {
            self.report.renamed += 1;
        }
        if let Some(w) = outcome.cleanup_warning {
            self.report.warnings.push(w);
        }
        Ok(())
    }

    fn create_tree(&mut self, task: &MergeTask) -> Result<(), MergeError> {
        if self.mode == TransferMode::Move
            && task.transfers_everything()
            && fs_ops::rename_dir(&task.source, &task.dest)?
        {
            self.report.renamed += 1;
            return Ok(());
        }

        let src_meta =
            fs::metadata(&task.source).map_err(MergeError::io("stat source directory", &task.source))?;
        fs_ops::create_dir(&task.dest)?;
        self.report.dirs_created += 1;
        debug!(dest = %task.dest.display(), entries = task.children.len(), "Filling new directory");

        self.execute_children(task)?;
        fs_ops::finish_dir(&task.dest, &src_meta);
        self.remove_moved_source_dir(task);
        Ok(())
    }

    /// After a move, drop the source directory unless skipped entries remain in it.
    fn remove_moved_source_dir(&mut self, task: &MergeTask) {
        if self.mode != TransferMode::Move {
            return;
        }
        match fs_ops::remove_source_dir_if_empty(&task.source) {
            Ok(true) => debug!(path = %task.source.display(), "Removed emptied source directory"),
            Ok(false) => debug!(path = %task.source.display(), "Source directory kept; skipped entries remain"),
            Err(e) => {
                debug!(path = %task.source.display(), error = %e, "failed to remove emptied source directory");
                self.report.warnings.push(format!(
                    "could not remove source directory '{}': {}",
                    task.source.display(),
                    e
                ));
            }
        }
    }
}
