//! Bringing modules to their declared state

use std::path::{Path, PathBuf};

use super::classify::{Classifier, Observation};
use super::{ReconcileOutcome, RepoState};
use crate::git::{AdapterResult, VersionControl};
use crate::manifest::ModuleSpec;

/// Clones missing modules and updates present ones
///
/// Module paths are resolved against the project root given at
/// construction.
pub struct Reconciler<V: VersionControl> {
    vcs: V,
    root: PathBuf,
}

impl<V: VersionControl> Reconciler<V> {
    /// Create a reconciler for the project rooted at `root`
    pub fn new(vcs: V, root: impl Into<PathBuf>) -> Self {
        Self {
            vcs,
            root: root.into(),
        }
    }

    /// The adapter in use
    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    /// Where `module` is checked out
    pub fn module_dir(&self, module: &ModuleSpec) -> PathBuf {
        self.root.join(&module.path)
    }

    /// Classify `module` without changing it
    pub fn observe(&self, module: &ModuleSpec) -> Observation {
        Classifier::new(&self.vcs).observe(&self.module_dir(module), &module.branch)
    }

    /// Bring `module` to its declared branch or pinned commit
    ///
    /// Local modifications are not stashed; whether they survive depends on
    /// the adapter's checkout mode and on git refusing to overwrite them.
    pub fn reconcile(&self, module: &ModuleSpec) -> ReconcileOutcome {
        let dir = self.module_dir(module);
        let state = Classifier::new(&self.vcs).classify(&dir, &module.branch);

        let result = if state.is_missing() {
            self.clone_module(module, &dir)
                .map(|()| ReconcileOutcome::Cloned)
        } else {
            if let RepoState::AdapterError { message } = &state {
                tracing::debug!(module = %module.name, error = %message, "Updating despite failed status check");
            }
            self.update_module(module, &dir)
                .map(|()| ReconcileOutcome::Updated)
        };

        result.unwrap_or_else(|e| {
            tracing::warn!(module = %module.name, error = %e, "Reconcile failed");
            ReconcileOutcome::Failed {
                message: e.to_string(),
            }
        })
    }

    fn clone_module(&self, module: &ModuleSpec, dir: &Path) -> AdapterResult<()> {
        tracing::info!(module = %module.name, url = %module.url, branch = %module.branch, "Cloning");
        let handle = self.vcs.clone_from(&module.url, dir, &module.branch)?;

        if let Some(commit) = &module.commit {
            self.vcs.checkout(&handle, commit)?;
        }
        Ok(())
    }

    fn update_module(&self, module: &ModuleSpec, dir: &Path) -> AdapterResult<()> {
        tracing::info!(module = %module.name, branch = %module.branch, "Updating");
        let handle = self.vcs.open(dir)?;
        self.vcs.checkout(&handle, &module.branch)?;

        match &module.commit {
            Some(commit) => self.vcs.checkout(&handle, commit),
            None => self.vcs.pull(&handle, &module.branch),
        }
    }
}
