//! Application orchestrator.
//! Builds the config from argv, initializes logging, installs the Ctrl-C handler,
//! runs every source, and reports the outcome once at the end.

use anyhow::Result;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, warn};

use crate::cli::Args;
use crate::config::{Config, LogLevel, TransferMode};
use crate::logging::init_tracing;
use crate::merge::RunSummary;
use crate::orchestrator;
use crate::output as out;
use crate::probe::TerminalProbe;
use crate::shutdown;

/// Exit status for a run in which at least one source failed.
const EXIT_FAILURES: u8 = 1;
/// Exit status for a command line that cannot run at all.
pub const EXIT_SETUP: u8 = 2;

/// Run one `merge-cp` / `merge-mv` invocation.
pub fn run(args: Args, mode: TransferMode) -> Result<ExitCode> {
    let Some((sources, destination)) = args.split_paths() else {
        out::print_error("at least one source and a destination are required");
        return Ok(ExitCode::from(EXIT_SETUP));
    };
    let cfg = args.to_config(mode);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), cfg.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        let installed = ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; stopping before the next entry...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take(); // drop guard here to flush tracing_appender
            }
        });
        if let Err(e) = installed {
            warn!(error = %e, "Ctrl-C handler not installed; an interrupt will stop the process immediately");
        }
    }

    debug!(command = mode.command_name(), policy = %cfg.policy, dry_run = cfg.dry_run, sources = sources.len(), "Starting");

    let mut probe = TerminalProbe::stdin();
    let summary = orchestrator::run(&sources, &destination, &cfg, &mut probe);

    if cfg.dry_run {
        print_plan(&summary, mode);
    }
    report(&summary, &cfg);

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    Ok(if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_FAILURES)
    })
}

fn print_plan(summary: &RunSummary, mode: TransferMode) {
    for done in &summary.completed {
        done.plan.walk(&mut |task| {
            out::print_plan_line(
                task.verb(mode),
                &task.source.display().to_string(),
                &task.dest.display().to_string(),
            );
        });
    }
}

/// Warnings and failures, printed once after all sources ran.
fn report(summary: &RunSummary, cfg: &Config) {
    let chatty = matches!(cfg.log_level, LogLevel::Info | LogLevel::Debug);
    if cfg.log_level != LogLevel::Quiet {
        for missing in &summary.missing {
            out::print_warn(&format!("'{}' does not exist; nothing to do", missing.display()));
        }
        for done in &summary.completed {
            for w in &done.report.warnings {
                out::print_warn(w);
            }
        }
    }

    for (src, e) in &summary.failures {
        error!(src = %src.display(), code = e.code(), kind = e.kind(), "{}", e);
    }

    if chatty && !cfg.dry_run && summary.is_success() {
        let totals = summary.totals();
        out::print_success(&format!(
            "{}: {} file(s) transferred, {} directory(ies) created, {} renamed, {} skipped",
            cfg.mode.command_name(),
            totals.files_transferred,
            totals.dirs_created,
            totals.renamed,
            totals.skipped
        ));
    }
}
