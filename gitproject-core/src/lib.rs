//! gitproject core - keeps a project's external git modules in sync
//!
//! A project declares its modules in a manifest. For each module this crate
//! can report how the local checkout relates to its remote ([`Classifier`])
//! and bring it to the declared branch or pinned commit ([`Reconciler`]).

pub mod config;
pub mod error;
pub mod git;
pub mod ignore;
pub mod manifest;
pub mod sync;

#[cfg(test)]
mod testutil;

pub use config::Config;
pub use error::{Error, Result};
pub use git::{AdapterError, CheckoutMode, CommitId, GitAdapter, GitRepo, VersionControl};
pub use ignore::{sync_ignore_file, IgnoreSync};
pub use manifest::{Manifest, ModuleSpec};
pub use sync::{Classifier, Observation, ReconcileOutcome, Reconciler, RepoState};
