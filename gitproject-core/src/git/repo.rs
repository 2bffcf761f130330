//! Working copy inspection on top of git2

use std::path::{Path, PathBuf};

use git2::{ErrorCode, Oid, Repository, StatusOptions};

use super::error::{AdapterError, AdapterResult};

/// An opened working copy
pub struct GitRepo {
    /// The underlying git2 repository
    repo: Repository,
    /// Path to the working copy root
    root: PathBuf,
}

impl std::fmt::Debug for GitRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepo")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl GitRepo {
    /// Open the working copy rooted at `path`
    ///
    /// Unlike `git` itself this does not search parent directories: a module
    /// directory nested inside the project's own repository is not that
    /// repository.
    pub fn open(path: impl AsRef<Path>) -> AdapterResult<Self> {
        let path = path.as_ref();

        let repo = Repository::open(path).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                AdapterError::NotARepository(path.to_path_buf())
            } else {
                AdapterError::Git(e)
            }
        })?;

        // Bare repositories have nothing to reconcile
        let root = repo
            .workdir()
            .ok_or_else(|| AdapterError::NotARepository(path.to_path_buf()))?
            .to_path_buf();

        Ok(Self { repo, root })
    }

    /// Get the working copy root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True if any file is modified, staged, deleted or untracked
    pub fn is_dirty(&self) -> AdapterResult<bool> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .include_ignored(false)
            .recurse_untracked_dirs(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        Ok(!statuses.is_empty())
    }

    /// Get the current branch name
    ///
    /// An unborn branch (fresh repository without commits) still reports the
    /// branch HEAD points at.
    pub fn current_branch(&self) -> AdapterResult<String> {
        let head = match self.repo.head() {
            Ok(h) => h,
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let head = self.repo.find_reference("HEAD")?;
                return head
                    .symbolic_target()
                    .and_then(|target| target.strip_prefix("refs/heads/"))
                    .map(|name| name.to_string())
                    .ok_or(AdapterError::DetachedHead);
            }
            Err(e) => return Err(AdapterError::Git(e)),
        };

        if !head.is_branch() {
            return Err(AdapterError::DetachedHead);
        }

        head.shorthand()
            .map(|s| s.to_string())
            .ok_or(AdapterError::DetachedHead)
    }

    /// Commit HEAD resolves to
    pub fn head_commit(&self) -> AdapterResult<Oid> {
        let commit = self.repo.head()?.peel_to_commit()?;
        Ok(commit.id())
    }

    /// Commit recorded by the remote-tracking ref `<remote>/<branch>`
    pub fn remote_branch_commit(&self, remote: &str, branch: &str) -> AdapterResult<Oid> {
        let name = format!("refs/remotes/{}/{}", remote, branch);
        let reference = self.repo.find_reference(&name).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                AdapterError::RemoteBranchMissing {
                    remote: remote.to_string(),
                    branch: branch.to_string(),
                }
            } else {
                AdapterError::Git(e)
            }
        })?;

        Ok(reference.peel_to_commit()?.id())
    }

    /// Commits reachable from `to` but not from `from`, newest first
    pub fn commits_between(&self, from: Oid, to: Oid) -> AdapterResult<Vec<Oid>> {
        let mut walk = self.repo.revwalk()?;
        walk.push(to)?;
        walk.hide(from)?;

        walk.map(|oid| oid.map_err(AdapterError::Git)).collect()
    }

    /// Ensure a remote with the given name is configured
    pub fn require_remote(&self, name: &str) -> AdapterResult<()> {
        self.repo.find_remote(name).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                AdapterError::RemoteNotFound(name.to_string())
            } else {
                AdapterError::Git(e)
            }
        })?;
        Ok(())
    }

    /// Get access to the underlying git2 repository
    pub fn inner(&self) -> &Repository {
        &self.repo
    }
}
