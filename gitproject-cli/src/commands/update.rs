//! Update command - clone missing modules, update present ones

use clap::Args;
use gitproject_core::Config;

use super::{load_manifest, reconciler};
use crate::output;

/// Clone missing modules and update present ones
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Only these modules (by name)
    pub modules: Vec<String>,

    /// Discard local modifications and untracked files in module checkouts
    #[arg(short, long)]
    pub force: bool,
}

impl UpdateArgs {
    /// Execute the update command
    ///
    /// Failures are reported per module; the run always continues.
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let manifest = load_manifest(config)?;
        let reconciler = reconciler(config, &manifest);

        let mut failed = 0;
        for module in manifest.select(&self.modules)? {
            let outcome = reconciler.reconcile(module);
            if !outcome.is_success() {
                failed += 1;
            }
            println!("{}", output::outcome_line(&module.name, &outcome));
        }

        if failed > 0 {
            tracing::warn!(failed, "Some modules could not be updated");
        }

        Ok(())
    }
}
