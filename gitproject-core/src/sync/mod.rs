//! Module state classification and reconciliation
//!
//! [`Classifier`] observes how a module's working copy relates to its
//! remote; [`Reconciler`] brings it to the state its [`ModuleSpec`] asks for.
//!
//! [`ModuleSpec`]: crate::manifest::ModuleSpec

mod classify;
mod reconcile;

use std::fmt;

pub use classify::{Classifier, Observation};
pub use reconcile::Reconciler;

/// Relationship of a working copy to its remote, observed once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoState {
    /// No working copy at the module path
    Missing,
    /// Uncommitted changes or untracked files
    Dirty,
    /// HEAD has commits the remote branch lacks (including divergence)
    AheadOfRemote,
    /// The remote branch has commits HEAD lacks
    BehindRemote {
        /// Remote-tracking ref that is ahead, e.g. `origin/main`
        remote_ref: String,
    },
    /// HEAD equals the remote branch
    UpToDate,
    /// The working copy could not be inspected
    AdapterError {
        /// Diagnostic from the version control tool
        message: String,
    },
}

impl RepoState {
    /// Short label, without detail
    pub fn label(&self) -> &'static str {
        match self {
            RepoState::Missing => "Not a git repository",
            RepoState::Dirty => "Local modifications",
            RepoState::AheadOfRemote => "Ahead of remote",
            RepoState::BehindRemote { .. } => "Behind remote",
            RepoState::UpToDate => "Up-to-date",
            RepoState::AdapterError { .. } => "Error",
        }
    }

    /// Whether the module has no working copy yet
    pub fn is_missing(&self) -> bool {
        matches!(self, RepoState::Missing)
    }
}

impl fmt::Display for RepoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoState::BehindRemote { remote_ref } => write!(f, "{} ({})", self.label(), remote_ref),
            RepoState::AdapterError { message } => write!(f, "{}: {}", self.label(), message),
            _ => f.write_str(self.label()),
        }
    }
}

/// Result of reconciling one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// A fresh working copy was cloned
    Cloned,
    /// The existing working copy was checked out and pulled (or pinned)
    Updated,
    /// A version control operation failed
    Failed {
        /// Diagnostic from the version control tool
        message: String,
    },
}

impl ReconcileOutcome {
    /// Short label, without detail
    pub fn label(&self) -> &'static str {
        match self {
            ReconcileOutcome::Cloned => "Cloned",
            ReconcileOutcome::Updated => "Updated",
            ReconcileOutcome::Failed { .. } => "Error",
        }
    }

    /// Whether the module ended in the requested state
    pub fn is_success(&self) -> bool {
        !matches!(self, ReconcileOutcome::Failed { .. })
    }
}

impl fmt::Display for ReconcileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileOutcome::Failed { message } => write!(f, "{}: {}", self.label(), message),
            _ => f.write_str(self.label()),
        }
    }
}
