//! Multi-source driver: classify every argument, settle the destination once,
//! then merge each source in argument order.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::classify::{EntryKind, PathDescriptor, classify, has_trailing_separator};
use crate::config::Config;
use crate::errors::MergeError;
use crate::merge::{RunSummary, TreeMerger};
use crate::resolver::Probe;
use crate::shutdown;

/// Run one invocation. Failures are collected per source; only errors that make the
/// rest of the invocation meaningless stop the loop early.
pub fn run(sources: &[OsString], destination: &OsStr, config: &Config, probe: &mut dyn Probe) -> RunSummary {
    let mut summary = RunSummary::default();

    let dest = match prepare_destination(sources.len(), destination, config) {
        Ok(d) => d,
        Err(e) => {
            debug!(dest = %destination.to_string_lossy(), kind = e.kind(), "destination unusable");
            summary.failures.push((PathBuf::from(destination), e));
            return summary;
        }
    };

    let mut merger = TreeMerger::new(config, probe);
    for raw in sources {
        if shutdown::is_requested() {
            summary.failures.push((PathBuf::from(raw), MergeError::Interrupted));
            break;
        }

        let src = classify(raw);
        if !src.kind.exists() {
            info!(src = %src.path.display(), "source does not exist; nothing to do");
            summary.missing.push(src.path);
            continue;
        }

        match merger.merge(&src, &dest) {
            Ok(done) => {
                info!(
                    src = %done.source.display(),
                    target = %done.target.display(),
                    files = done.report.files_transferred,
                    skipped = done.report.skipped,
                    "Merged source"
                );
                summary.completed.push(done);
            }
            Err(e) => {
                debug!(src = %src.path.display(), kind = e.kind(), fatal = e.is_fatal_for_invocation(), "source failed");
                let fatal = e.is_fatal_for_invocation();
                summary.failures.push((src.path, e));
                if fatal {
                    break;
                }
            }
        }
    }

    summary
}

/// Classify the destination. With several sources, or a trailing separator, it must be
/// (or become) a directory; a missing one is created unless this is a dry run.
fn prepare_destination(source_count: usize, raw: &OsStr, config: &Config) -> Result<PathDescriptor, MergeError> {
    let mut dest = classify(raw);
    let container = source_count > 1 || has_trailing_separator(raw);
    if !container {
        return Ok(dest);
    }

    match dest.kind {
        EntryKind::Directory => {}
        EntryKind::File => return Err(MergeError::DestinationNotDirectory(dest.path)),
        EntryKind::Missing => {
            if !config.dry_run {
                fs::create_dir_all(&dest.path).map_err(MergeError::io("create destination directory", &dest.path))?;
                info!(dest = %dest.path.display(), "Created destination directory");
            }
            dest.kind = EntryKind::Directory;
        }
    }
    Ok(dest)
}
