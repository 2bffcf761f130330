//! Branch and revision checkout

use git2::build::CheckoutBuilder;
use git2::{ErrorCode, Oid};

use super::error::{AdapterError, AdapterResult};
use super::repo::GitRepo;

/// How checkout treats local modifications
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckoutMode {
    /// Refuse to overwrite modified files, like `git checkout`
    #[default]
    Safe,
    /// Overwrite modified files and remove untracked ones
    Force,
}

impl CheckoutMode {
    fn builder(self) -> CheckoutBuilder<'static> {
        let mut builder = CheckoutBuilder::new();
        match self {
            CheckoutMode::Safe => {
                builder.safe();
            }
            CheckoutMode::Force => {
                builder.force().remove_untracked(true);
            }
        }
        builder
    }
}

/// Where a checkout leaves HEAD
enum Target {
    /// An existing local branch
    Branch { refname: String, commit: Oid },
    /// A local branch to create from its remote-tracking ref
    TrackingBranch { name: String, upstream: String, commit: Oid },
    /// Any other revision, checked out detached
    Detached(Oid),
}

impl GitRepo {
    /// Check out a branch or revision
    ///
    /// Resolution order matches `git checkout <reference>`:
    /// 1. A local branch
    /// 2. A branch of `remote`, creating a local branch that tracks it
    /// 3. Any revision (commit id, tag, ...), detaching HEAD
    pub fn checkout_reference(
        &self,
        reference: &str,
        remote: &str,
        mode: CheckoutMode,
    ) -> AdapterResult<()> {
        let target = self.resolve_checkout_target(reference, remote)?;
        let repo = self.inner();

        let commit_id = match &target {
            Target::Branch { commit, .. }
            | Target::TrackingBranch { commit, .. }
            | Target::Detached(commit) => *commit,
        };
        let commit = repo.find_commit(commit_id)?;
        repo.checkout_tree(commit.as_object(), Some(&mut mode.builder()))?;

        match target {
            Target::Branch { refname, .. } => {
                repo.set_head(&refname)?;
            }
            Target::TrackingBranch { name, upstream, .. } => {
                let mut branch = repo.branch(&name, &commit, false)?;
                branch.set_upstream(Some(upstream.as_str()))?;
                repo.set_head(&format!("refs/heads/{}", name))?;
            }
            Target::Detached(oid) => {
                repo.set_head_detached(oid)?;
            }
        }

        tracing::debug!(root = %self.root().display(), reference, "Checked out");
        Ok(())
    }

    fn resolve_checkout_target(&self, reference: &str, remote: &str) -> AdapterResult<Target> {
        let repo = self.inner();

        let refname = format!("refs/heads/{}", reference);
        if let Ok(local) = repo.find_reference(&refname) {
            let commit = local.peel_to_commit()?.id();
            return Ok(Target::Branch { refname, commit });
        }

        if let Ok(tracking) = repo.find_reference(&format!("refs/remotes/{}/{}", remote, reference)) {
            let commit = tracking.peel_to_commit()?.id();
            return Ok(Target::TrackingBranch {
                name: reference.to_string(),
                upstream: format!("{}/{}", remote, reference),
                commit,
            });
        }

        let object = repo.revparse_single(reference).map_err(|e| {
            if matches!(e.code(), ErrorCode::NotFound | ErrorCode::Ambiguous | ErrorCode::InvalidSpec) {
                AdapterError::RevisionNotFound(reference.to_string())
            } else {
                AdapterError::Git(e)
            }
        })?;

        Ok(Target::Detached(object.peel_to_commit()?.id()))
    }
}
