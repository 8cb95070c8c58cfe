//! Planning pass: walk the source tree, ask the resolver about every entry, and
//! produce a `MergeTask` tree. Nothing on disk is modified here, so an abort
//! anywhere in the tree leaves both sides untouched.

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::classify::{EntryKind, kind_of};
use crate::config::{ConflictPolicy, TransferMode};
use crate::errors::MergeError;
use crate::resolver::{AbortReason, Action, Probe, Prompt, resolve};
use crate::shutdown;

use super::target::{is_same_file, resolve_lenient};

/// One entry of the merge, with the action decided for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeTask {
    pub source: PathBuf,
    pub dest: PathBuf,
    /// Kind of the incoming entry.
    pub kind: EntryKind,
    /// What occupied `dest` when the plan was made.
    pub existing: EntryKind,
    pub action: Action,
    /// Why the planner skipped an entry on its own (not a policy decision).
    pub note: Option<&'static str>,
    /// Sorted by file name. Empty for files and for skipped directories.
    pub children: Vec<MergeTask>,
}

impl MergeTask {
    fn skipped(source: PathBuf, kind: EntryKind, dest: PathBuf, existing: EntryKind, note: &'static str) -> Self {
        Self {
            source,
            dest,
            kind,
            existing,
            action: Action::Skip,
            note: Some(note),
            children: Vec::new(),
        }
    }

    /// Error reported when this task's action is an abort.
    pub(crate) fn abort_error(&self, reason: AbortReason) -> MergeError {
        match reason {
            AbortReason::TypeConflict => MergeError::TypeConflict {
                incoming: self.source.clone(),
                incoming_kind: self.kind,
                existing: self.dest.clone(),
                existing_kind: self.existing,
            },
            AbortReason::PromptUnavailable => MergeError::InteractivePromptUnavailable(self.dest.clone()),
        }
    }

    /// True when nothing in this subtree is skipped, i.e. the whole tree may be
    /// relocated in one step.
    pub fn transfers_everything(&self) -> bool {
        self.action != Action::Skip && self.children.iter().all(MergeTask::transfers_everything)
    }

    /// Pre-order traversal.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a MergeTask)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }

    /// Short verb for dry-run listings.
    pub fn verb(&self, mode: TransferMode) -> &'static str {
        match (self.action, self.kind) {
            (Action::Skip, _) => "skip",
            (Action::MergeInto, _) => "merge",
            (Action::Overwrite, _) => "replace",
            (Action::Abort(_), _) => "abort",
            (Action::Create, EntryKind::Directory) if mode == TransferMode::Copy => "mkdir",
            (Action::Create, _) => mode.verb(),
        }
    }
}

/// Source directory being planned, as given and canonicalized.
struct SourceRoot {
    path: PathBuf,
    real: PathBuf,
}

/// Builds the task tree for one source root.
pub struct Planner<'p> {
    policy: ConflictPolicy,
    probe: &'p mut dyn Probe,
    root: Option<SourceRoot>,
}

impl<'p> Planner<'p> {
    pub fn new(policy: ConflictPolicy, probe: &'p mut dyn Probe) -> Self {
        Self {
            policy,
            probe,
            root: None,
        }
    }

    /// Plan `source` (of `kind`) landing at `dest`.
    pub fn plan(&mut self, source: &Path, kind: EntryKind, dest: &Path) -> Result<MergeTask, MergeError> {
        self.root = match kind {
            EntryKind::Directory => Some(SourceRoot {
                path: source.to_path_buf(),
                real: dunce::canonicalize(source).map_err(MergeError::io("resolve source", source))?,
            }),
            _ => None,
        };
        self.plan_entry(source.to_path_buf(), kind, dest.to_path_buf(), false)
    }

    /// A flattened source can map one of its own entries back onto itself
    /// (`merge-cp a/sub/ a` sends `sub` to `a/sub`). Refuse any destination inside
    /// the source tree. Only occupied destinations need the check: below a vacant
    /// one nothing can resolve into the source.
    fn ensure_outside_source(&self, dest: &Path) -> Result<(), MergeError> {
        let Some(root) = &self.root else {
            return Ok(());
        };
        if resolve_lenient(dest).starts_with(&root.real) {
            debug!(src = %root.path.display(), dest = %dest.display(), "destination lies inside the source tree");
            return Err(MergeError::IntoItself {
                src: root.path.clone(),
                dest: dest.to_path_buf(),
            });
        }
        Ok(())
    }

    /// `dest_vacant` is set below a directory that will be created (or that replaces
    /// an obstruction), so the destination side is known to be empty.
    fn plan_entry(
        &mut self,
        source: PathBuf,
        kind: EntryKind,
        dest: PathBuf,
        dest_vacant: bool,
    ) -> Result<MergeTask, MergeError> {
        shutdown::checkpoint()?;
        if !dest_vacant {
            self.ensure_outside_source(&dest)?;
        }
        let existing = if dest_vacant { EntryKind::Missing } else { kind_of(&dest) };

        if kind == EntryKind::File && existing == EntryKind::File && is_same_file(&source, &dest) {
            return Ok(MergeTask::skipped(
                source,
                kind,
                dest,
                existing,
                "source and destination are the same file",
            ));
        }

        let prompt = Prompt {
            incoming: &source,
            incoming_kind: kind,
            existing: &dest,
            existing_kind: existing,
        };
        let action = resolve(self.policy, &prompt, &mut *self.probe);
        trace!(src = %source.display(), dest = %dest.display(), %existing, ?action, "resolved");

        let mut task = MergeTask {
            source,
            dest,
            kind,
            existing,
            action,
            note: None,
            children: Vec::new(),
        };

        match action {
            Action::Abort(reason) => return Err(task.abort_error(reason)),
            Action::Create | Action::Overwrite | Action::MergeInto if kind == EntryKind::Directory => {
                let vacant = action != Action::MergeInto;
                task.children = self.plan_children(&task.source, &task.dest, vacant)?;
            }
            Action::Skip => {
                debug!(src = %task.source.display(), dest = %task.dest.display(), "will skip existing entry");
            }
            _ => {}
        }
        Ok(task)
    }

    fn plan_children(&mut self, src_dir: &Path, dest_dir: &Path, dest_vacant: bool) -> Result<Vec<MergeTask>, MergeError> {
        let mut children = Vec::new();
        let entries = WalkDir::new(src_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in entries {
            let entry = entry.map_err(|e| walk_error(src_dir, e))?;
            let source = entry.path().to_path_buf();
            let dest = dest_dir.join(entry.file_name());
            let file_type = entry.file_type();

            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                let existing = if dest_vacant { EntryKind::Missing } else { kind_of(&dest) };
                let note = if file_type.is_symlink() {
                    "symbolic links inside a source tree are not transferred"
                } else {
                    "not a regular file or directory"
                };
                children.push(MergeTask::skipped(source, EntryKind::File, dest, existing, note));
                continue;
            };

            children.push(self.plan_entry(source, kind, dest, dest_vacant)?);
        }
        Ok(children)
    }
}

fn walk_error(dir: &Path, e: walkdir::Error) -> MergeError {
    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
    match e.into_io_error() {
        Some(io_err) => MergeError::from_io("read directory", &path, io_err),
        None => MergeError::Io {
            context: format!("filesystem loop while reading {}", path.display()),
            path,
            cause: io::Error::other("filesystem loop"),
        },
    }
}
