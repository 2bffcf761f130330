//! CLI command implementations

pub mod gitignore;
pub mod status;
pub mod update;

pub use gitignore::GitignoreArgs;
pub use status::StatusArgs;
pub use update::UpdateArgs;

use anyhow::Context;
use gitproject_core::{Config, GitAdapter, Manifest, Reconciler};

/// Locate and load the project manifest from the current directory
pub fn load_manifest(config: &Config) -> anyhow::Result<Manifest> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let manifest = Manifest::locate(&config.manifest, &cwd)?;

    tracing::debug!(
        manifest = %manifest.path().display(),
        root = %manifest.root().display(),
        modules = manifest.modules().len(),
        "Manifest loaded"
    );
    Ok(manifest)
}

/// Reconciler for the project the manifest describes
pub fn reconciler(config: &Config, manifest: &Manifest) -> Reconciler<GitAdapter> {
    Reconciler::new(GitAdapter::from_config(&config.git), manifest.root())
}
