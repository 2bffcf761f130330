//! Repository fixtures shared by unit tests

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use git2::{Commit, Oid, Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

use crate::git::{AdapterError, AdapterResult, CommitId, GitCli, VersionControl};

/// Initialize a non-bare repository whose HEAD points at `branch`
pub fn init_repo(path: &Path, branch: &str) -> Repository {
    let mut opts = RepositoryInitOptions::new();
    opts.mkpath(true).initial_head(branch);
    Repository::init_opts(path, &opts).unwrap()
}

/// Write `content` to `name` and commit it on HEAD
pub fn commit_file(repo: &Repository, name: &str, content: &str, message: &str) -> Oid {
    let workdir = repo.workdir().unwrap();
    let path = workdir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(name)).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

    let sig = Signature::now("Test User", "test@example.com").unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}

/// Whether the `git` executable is installed
pub fn git_available() -> bool {
    GitCli::new().is_available()
}

/// An upstream repository plus an empty project directory to clone into
pub struct Fixture {
    temp: TempDir,
    upstream: Repository,
    initial: Oid,
}

impl Fixture {
    /// Create an upstream with one commit on `branch`
    pub fn new(branch: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let upstream = init_repo(&temp.path().join("upstream"), branch);
        let initial = commit_file(&upstream, "README.md", "upstream\n", "initial");
        std::fs::create_dir(temp.path().join("project")).unwrap();

        Self {
            temp,
            upstream,
            initial,
        }
    }

    /// Clone URL of the upstream
    pub fn url(&self) -> String {
        self.temp.path().join("upstream").display().to_string()
    }

    /// The project root modules are resolved against
    pub fn project_root(&self) -> PathBuf {
        self.temp.path().join("project")
    }

    /// Where the module checkout lives
    pub fn checkout_path(&self) -> PathBuf {
        self.project_root().join("lib")
    }

    /// First commit of the upstream
    pub fn initial_commit(&self) -> Oid {
        self.initial
    }

    /// Commit on the upstream's checked-out branch
    pub fn upstream_commit(&self, name: &str, content: &str, message: &str) -> Oid {
        commit_file(&self.upstream, name, content, message)
    }
}

/// In-memory [`VersionControl`] that replays canned observations and
/// records every call
#[derive(Debug, Default)]
pub struct ScriptedAdapter {
    /// Whether a working copy exists
    pub present: Cell<bool>,
    /// Uncommitted changes present
    pub dirty: bool,
    /// HEAD commit
    pub local: &'static str,
    /// Remote branch commit
    pub remote: &'static str,
    /// Commits only HEAD has
    pub local_only: Vec<&'static str>,
    /// Operations that fail, by name ("open", "fetch", "checkout", ...)
    pub failing: Vec<&'static str>,
    /// Calls in order
    pub calls: RefCell<Vec<String>>,
}

impl ScriptedAdapter {
    /// A clean working copy in sync with its remote
    pub fn up_to_date() -> Self {
        Self {
            present: Cell::new(true),
            local: "aaaa",
            remote: "aaaa",
            ..Self::default()
        }
    }

    /// No working copy
    pub fn missing() -> Self {
        Self::default()
    }

    /// Make `op` fail
    pub fn fail_on(mut self, op: &'static str) -> Self {
        self.failing.push(op);
        self
    }

    /// Recorded calls
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, op: &'static str, call: String) -> AdapterResult<()> {
        self.calls.borrow_mut().push(call);
        if self.failing.contains(&op) {
            return Err(AdapterError::Command {
                command: format!("git {}", op),
                stderr: format!("{} exploded", op),
            });
        }
        Ok(())
    }
}

impl VersionControl for ScriptedAdapter {
    type Handle = ();

    fn open(&self, path: &Path) -> AdapterResult<()> {
        self.record("open", "open".to_string())?;
        if self.present.get() {
            Ok(())
        } else {
            Err(AdapterError::NotARepository(path.to_path_buf()))
        }
    }

    fn is_dirty(&self, _: &()) -> AdapterResult<bool> {
        self.record("status", "status".to_string())?;
        Ok(self.dirty)
    }

    fn current_branch(&self, _: &()) -> AdapterResult<String> {
        self.record("branch", "branch".to_string())?;
        Ok("main".to_string())
    }

    fn fetch_remote(&self, _: &()) -> AdapterResult<()> {
        self.record("fetch", "fetch".to_string())
    }

    fn local_head_commit(&self, _: &()) -> AdapterResult<CommitId> {
        self.record("head", "head".to_string())?;
        Ok(CommitId::new(self.local))
    }

    fn remote_branch_commit(
        &self,
        _: &(),
        branch: &str,
    ) -> AdapterResult<CommitId> {
        self.record("remote-head", format!("remote-head {}", branch))?;
        Ok(CommitId::new(self.remote))
    }

    fn commits_reachable_between(
        &self,
        _: &(),
        from: &CommitId,
        to: &CommitId,
    ) -> AdapterResult<Vec<CommitId>> {
        self.record("rev-list", format!("rev-list {}..{}", from, to))?;
        Ok(self
            .local_only
            .iter()
            .map(|id| CommitId::new(*id))
            .collect())
    }

    fn checkout(&self, _: &(), reference: &str) -> AdapterResult<()> {
        self.record("checkout", format!("checkout {}", reference))
    }

    fn pull(&self, _: &(), branch: &str) -> AdapterResult<()> {
        self.record("pull", format!("pull {}", branch))
    }

    fn clone_from(&self, url: &str, dest: &Path, branch: &str) -> AdapterResult<()> {
        self.record(
            "clone",
            format!("clone {} {} {}", url, dest.display(), branch),
        )?;
        self.present.set(true);
        Ok(())
    }

    fn remote_name(&self) -> &str {
        "origin"
    }
}
