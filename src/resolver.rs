//! Conflict resolution.
//!
//! `resolve` is the only place where policy and interactivity decide what happens
//! to a colliding path. It performs no I/O of its own; the interactive answer comes
//! from an injected [`Probe`].

use std::path::Path;

use crate::classify::EntryKind;
use crate::config::ConflictPolicy;

/// Decision for one (incoming, existing) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Destination is free: create the file, or the directory and descend.
    Create,
    /// Replace the existing destination entry.
    Overwrite,
    /// Both are directories: descend without touching the destination directory itself.
    MergeInto,
    /// Leave the destination alone and keep the source entry.
    Skip,
    /// Stop processing the current source argument.
    Abort(AbortReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// Kinds differ and policy is Replace.
    TypeConflict,
    /// Same-kind collision under Interactive with no one to ask.
    PromptUnavailable,
}

/// Operator's reply to a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    /// No response channel (not a terminal, or input closed).
    Unavailable,
}

/// Question handed to the probe.
#[derive(Debug, Clone, Copy)]
pub struct Prompt<'a> {
    pub incoming: &'a Path,
    pub incoming_kind: EntryKind,
    pub existing: &'a Path,
    pub existing_kind: EntryKind,
}

impl Prompt<'_> {
    pub fn kinds_differ(&self) -> bool {
        self.incoming_kind != self.existing_kind
    }

    /// One-line question shown to the operator.
    pub fn question(&self) -> String {
        if self.kinds_differ() {
            format!(
                "replace {} '{}' with {} '{}'?",
                self.existing_kind,
                self.existing.display(),
                self.incoming_kind,
                self.incoming.display()
            )
        } else {
            format!(
                "overwrite '{}' with '{}'?",
                self.existing.display(),
                self.incoming.display()
            )
        }
    }
}

/// Source of interactive answers.
pub trait Probe {
    fn confirm(&mut self, prompt: &Prompt<'_>) -> Answer;
}

/// Decide what to do with `incoming` landing on `existing`.
///
/// The probe is only consulted under `Interactive` and only when the destination
/// exists and is not a directory-into-directory merge.
pub fn resolve(policy: ConflictPolicy, prompt: &Prompt<'_>, probe: &mut dyn Probe) -> Action {
    if !prompt.existing_kind.exists() {
        return Action::Create;
    }

    if !prompt.kinds_differ() {
        if prompt.incoming_kind == EntryKind::Directory {
            return Action::MergeInto;
        }
        return match policy {
            ConflictPolicy::NoReplace => Action::Skip,
            ConflictPolicy::Replace => Action::Overwrite,
            ConflictPolicy::Interactive => match probe.confirm(prompt) {
                Answer::Yes => Action::Overwrite,
                Answer::No => Action::Skip,
                Answer::Unavailable => Action::Abort(AbortReason::PromptUnavailable),
            },
        };
    }

    match policy {
        ConflictPolicy::NoReplace => Action::Skip,
        ConflictPolicy::Replace => Action::Abort(AbortReason::TypeConflict),
        ConflictPolicy::Interactive => match probe.confirm(prompt) {
            Answer::Yes => Action::Overwrite,
            // never replace a subtree (or a leaf by a subtree) without an explicit yes
            Answer::No | Answer::Unavailable => Action::Skip,
        },
    }
}
