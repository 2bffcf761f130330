//! Version control error taxonomy
//!
//! Callers branch on these variants, never on message text. The message of
//! each variant carries the underlying tool's diagnostic verbatim.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for adapter operations
pub type AdapterResult<T> = std::result::Result<T, AdapterError>;

/// Failure reported by a version control adapter
#[derive(Error, Debug)]
pub enum AdapterError {
    /// Path is missing or is not the root of a working copy
    #[error("Not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    /// HEAD does not point at a branch
    #[error("HEAD is detached")]
    DetachedHead,

    /// The configured remote does not exist in the working copy
    #[error("Remote '{0}' not found")]
    RemoteNotFound(String),

    /// The remote-tracking ref for a branch is absent
    #[error("Remote branch '{remote}/{branch}' not found")]
    RemoteBranchMissing {
        /// Remote name
        remote: String,
        /// Branch name
        branch: String,
    },

    /// A branch, tag or commit could not be resolved
    #[error("Revision '{0}' not found")]
    RevisionNotFound(String),

    /// Error raised by libgit2
    #[error("{}", .0.message())]
    Git(#[from] git2::Error),

    /// A git subprocess exited unsuccessfully
    #[error("{command} failed: {stderr}")]
    Command {
        /// Command line that was run
        command: String,
        /// Trimmed standard error output
        stderr: String,
    },

    /// Filesystem error while preparing a working copy
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The git executable could not be started
    #[error("Failed to run {program}: {source}")]
    GitUnavailable {
        /// Program that was invoked
        program: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },
}

impl AdapterError {
    /// Whether this error means there is no working copy at the path
    pub fn is_not_a_repository(&self) -> bool {
        matches!(self, AdapterError::NotARepository(_))
    }
}
