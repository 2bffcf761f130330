//! [`VersionControl`] implementation for git

use std::path::Path;

use super::checkout::CheckoutMode;
use super::error::AdapterResult;
use super::remote::GitCli;
use super::repo::GitRepo;
use super::{CommitId, VersionControl};
use crate::config::GitConfig;

/// Git adapter: git2 for local inspection and checkout, the `git`
/// executable for fetch, pull and clone
#[derive(Debug, Clone)]
pub struct GitAdapter {
    cli: GitCli,
    remote: String,
    checkout_mode: CheckoutMode,
}

impl GitAdapter {
    /// Create an adapter talking to `origin` with safe checkouts
    pub fn new() -> Self {
        Self {
            cli: GitCli::new(),
            remote: "origin".to_string(),
            checkout_mode: CheckoutMode::Safe,
        }
    }

    /// Create an adapter from the `[git]` configuration section
    pub fn from_config(config: &GitConfig) -> Self {
        let mode = if config.force {
            CheckoutMode::Force
        } else {
            CheckoutMode::Safe
        };

        Self::new()
            .with_git_path(config.git_path.clone())
            .with_remote(config.remote.clone())
            .with_checkout_mode(mode)
    }

    /// Use a specific git executable
    pub fn with_git_path(mut self, path: impl Into<String>) -> Self {
        self.cli = self.cli.with_program(path);
        self
    }

    /// Fetch from and pull from a different remote
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Change how checkouts treat local modifications
    pub fn with_checkout_mode(mut self, mode: CheckoutMode) -> Self {
        self.checkout_mode = mode;
        self
    }

    /// The checkout mode in use
    pub fn checkout_mode(&self) -> CheckoutMode {
        self.checkout_mode
    }
}

impl Default for GitAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for GitAdapter {
    type Handle = GitRepo;

    fn open(&self, path: &Path) -> AdapterResult<GitRepo> {
        GitRepo::open(path)
    }

    fn is_dirty(&self, handle: &GitRepo) -> AdapterResult<bool> {
        handle.is_dirty()
    }

    fn current_branch(&self, handle: &GitRepo) -> AdapterResult<String> {
        handle.current_branch()
    }

    fn fetch_remote(&self, handle: &GitRepo) -> AdapterResult<()> {
        handle.require_remote(&self.remote)?;
        self.cli.fetch(handle.root(), &self.remote)
    }

    fn local_head_commit(&self, handle: &GitRepo) -> AdapterResult<CommitId> {
        handle.head_commit().map(CommitId::from)
    }

    fn remote_branch_commit(&self, handle: &GitRepo, branch: &str) -> AdapterResult<CommitId> {
        handle
            .remote_branch_commit(&self.remote, branch)
            .map(CommitId::from)
    }

    fn commits_reachable_between(
        &self,
        handle: &GitRepo,
        from: &CommitId,
        to: &CommitId,
    ) -> AdapterResult<Vec<CommitId>> {
        let from = git2::Oid::from_str(from.as_str())?;
        let to = git2::Oid::from_str(to.as_str())?;
        let commits = handle.commits_between(from, to)?;
        Ok(commits.into_iter().map(CommitId::from).collect())
    }

    fn checkout(&self, handle: &GitRepo, reference: &str) -> AdapterResult<()> {
        handle.checkout_reference(reference, &self.remote, self.checkout_mode)
    }

    fn pull(&self, handle: &GitRepo, branch: &str) -> AdapterResult<()> {
        handle.require_remote(&self.remote)?;
        self.cli.pull(handle.root(), &self.remote, branch)
    }

    fn clone_from(&self, url: &str, dest: &Path, branch: &str) -> AdapterResult<GitRepo> {
        self.cli.clone_repo(url, dest, branch)?;
        GitRepo::open(dest)
    }

    fn remote_name(&self) -> &str {
        &self.remote
    }
}
