//! Working copy state classification

use std::path::Path;

use super::RepoState;
use crate::git::{AdapterError, AdapterResult, VersionControl};

/// A classified working copy plus the branch it has checked out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Relationship to the remote
    pub state: RepoState,
    /// Checked-out branch; `None` when missing, detached or unreadable
    pub head_branch: Option<String>,
}

impl Observation {
    fn without_branch(state: RepoState) -> Self {
        Self {
            state,
            head_branch: None,
        }
    }
}

/// Maps adapter observations of a working copy to a [`RepoState`]
///
/// The only side effect is the remote fetch needed to compare against the
/// remote branch, which touches remote-tracking refs and nothing else.
pub struct Classifier<'a, V: VersionControl> {
    vcs: &'a V,
}

impl<'a, V: VersionControl> Classifier<'a, V> {
    /// Create a classifier over an adapter
    pub fn new(vcs: &'a V) -> Self {
        Self { vcs }
    }

    /// Classify the working copy at `path` against `branch` on the remote
    pub fn classify(&self, path: &Path, branch: &str) -> RepoState {
        self.observe(path, branch).state
    }

    /// Classify and report the checked-out branch
    pub fn observe(&self, path: &Path, branch: &str) -> Observation {
        let handle = match self.vcs.open(path) {
            Ok(handle) => handle,
            Err(AdapterError::NotARepository(_)) => {
                return Observation::without_branch(RepoState::Missing);
            }
            Err(e) => return Observation::without_branch(error_state(&e)),
        };

        let head_branch = self.vcs.current_branch(&handle).ok();
        let state = self
            .compare(&handle, branch)
            .unwrap_or_else(|e| error_state(&e));

        tracing::debug!(
            path = %path.display(),
            branch,
            head = ?head_branch,
            state = %state,
            "Classified working copy"
        );

        Observation { state, head_branch }
    }

    fn compare(&self, handle: &V::Handle, branch: &str) -> AdapterResult<RepoState> {
        // Local modifications win over any remote comparison
        if self.vcs.is_dirty(handle)? {
            return Ok(RepoState::Dirty);
        }

        self.vcs.fetch_remote(handle)?;

        let local = self.vcs.local_head_commit(handle)?;
        let remote = self.vcs.remote_branch_commit(handle, branch)?;
        if local == remote {
            return Ok(RepoState::UpToDate);
        }

        // Divergence counts as ahead
        let local_only = self.vcs.commits_reachable_between(handle, &remote, &local)?;
        if !local_only.is_empty() {
            return Ok(RepoState::AheadOfRemote);
        }

        Ok(RepoState::BehindRemote {
            remote_ref: format!("{}/{}", self.vcs.remote_name(), branch),
        })
    }
}

fn error_state(error: &AdapterError) -> RepoState {
    RepoState::AdapterError {
        message: error.to_string(),
    }
}
