//! Status command - show how each module relates to its remote

use clap::Args;
use gitproject_core::Config;

use super::{load_manifest, reconciler};
use crate::output;

/// Show the status of modules
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Only these modules (by name)
    pub modules: Vec<String>,
}

impl StatusArgs {
    /// Execute the status command
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let manifest = load_manifest(config)?;
        let reconciler = reconciler(config, &manifest);

        for module in manifest.select(&self.modules)? {
            let observation = reconciler.observe(module);
            println!("{}", output::status_line(&module.name, &observation));
        }

        Ok(())
    }
}
