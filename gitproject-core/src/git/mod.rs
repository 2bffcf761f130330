//! Git operations for gitproject
//!
//! This module provides the [`VersionControl`] capability trait used by the
//! sync logic, and [`GitAdapter`], its implementation on top of git2 and the
//! `git` executable.

mod adapter;
mod checkout;
mod error;
mod remote;
mod repo;

use std::fmt;
use std::path::Path;

pub use adapter::GitAdapter;
pub use checkout::CheckoutMode;
pub use error::{AdapterError, AdapterResult};
pub use remote::GitCli;
pub use repo::GitRepo;

/// Identifier of a commit (full hex object id)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitId(String);

impl CommitId {
    /// Wrap a commit identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<git2::Oid> for CommitId {
    fn from(oid: git2::Oid) -> Self {
        Self(oid.to_string())
    }
}

/// Capabilities the sync logic needs from a version control system
///
/// Every operation is scoped to a single working copy, identified by the
/// handle returned from [`open`](VersionControl::open) or
/// [`clone_from`](VersionControl::clone_from).
pub trait VersionControl {
    /// An opened working copy
    type Handle;

    /// Open the working copy rooted exactly at `path`
    ///
    /// Fails with [`AdapterError::NotARepository`] when the path is missing or
    /// is not a working copy root.
    fn open(&self, path: &Path) -> AdapterResult<Self::Handle>;

    /// True if there are uncommitted changes or untracked files
    fn is_dirty(&self, handle: &Self::Handle) -> AdapterResult<bool>;

    /// Name of the checked-out branch
    fn current_branch(&self, handle: &Self::Handle) -> AdapterResult<String>;

    /// Update remote-tracking refs from the remote
    fn fetch_remote(&self, handle: &Self::Handle) -> AdapterResult<()>;

    /// Commit HEAD points at
    fn local_head_commit(&self, handle: &Self::Handle) -> AdapterResult<CommitId>;

    /// Commit the remote-tracking ref of `branch` points at
    fn remote_branch_commit(&self, handle: &Self::Handle, branch: &str) -> AdapterResult<CommitId>;

    /// Commits reachable from `to` but not from `from`, newest first
    fn commits_reachable_between(
        &self,
        handle: &Self::Handle,
        from: &CommitId,
        to: &CommitId,
    ) -> AdapterResult<Vec<CommitId>>;

    /// Check out a branch or revision
    fn checkout(&self, handle: &Self::Handle, reference: &str) -> AdapterResult<()>;

    /// Merge the remote `branch` into the current branch
    fn pull(&self, handle: &Self::Handle, branch: &str) -> AdapterResult<()>;

    /// Clone `url` into `dest` with `branch` checked out
    fn clone_from(&self, url: &str, dest: &Path, branch: &str) -> AdapterResult<Self::Handle>;

    /// Name of the remote that fetch and pull talk to
    fn remote_name(&self) -> &str;
}
