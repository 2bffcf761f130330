//! Gitignore command - keep module checkouts out of the project's history

use clap::Args;
use gitproject_core::{sync_ignore_file, Config, IgnoreSync};

use super::load_manifest;

/// Add module paths to the project's ignore file
#[derive(Args, Debug)]
pub struct GitignoreArgs {}

impl GitignoreArgs {
    /// Execute the gitignore command
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let manifest = load_manifest(config)?;
        let file = manifest.root().join(&config.ignore.file_name);
        let paths: Vec<_> = manifest.modules().iter().map(|m| m.path.clone()).collect();

        match sync_ignore_file(&file, &paths)? {
            IgnoreSync::Created { added } => {
                println!(
                    "{} created with {} module path(s).",
                    config.ignore.file_name,
                    added.len()
                );
            }
            IgnoreSync::Updated { added } => {
                println!("Updated {} with new module paths:", config.ignore.file_name);
                for entry in added {
                    println!("  {}", entry);
                }
            }
            IgnoreSync::Unchanged => {
                println!("No new paths to add to {}.", config.ignore.file_name);
            }
        }

        Ok(())
    }
}
