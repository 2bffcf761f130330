//! gitproject CLI - Command line interface for gitproject
//!
//! Manage and synchronize the external git modules of a project.

mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gitproject_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{GitignoreArgs, StatusArgs, UpdateArgs};

/// gitproject: manage the external git modules of a project
#[derive(Parser, Debug)]
#[command(name = "gitproject")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Manifest to use instead of searching upward for .gitproject
    #[arg(short, long, global = true)]
    manifest: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the status of modules
    #[command(visible_alias = "s")]
    Status(StatusArgs),

    /// Clone missing modules and update present ones
    #[command(visible_alias = "u")]
    Update(UpdateArgs),

    /// Add module paths to the project's .gitignore
    #[command(visible_alias = "g")]
    Gitignore(GitignoreArgs),

    /// Show current configuration
    Config,

    /// Show version information
    Version,
}

/// Log filter: `--verbose` wins, then `RUST_LOG`, then `info` so clone and
/// update progress is visible
fn log_filter(verbose: bool, rust_log: Option<String>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(cli.verbose, std::env::var("RUST_LOG").ok()))
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let force = matches!(&cli.command, Some(Commands::Update(args)) if args.force);

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.manifest.clone(), force)?;

    if cli.verbose {
        tracing::info!(
            manifest = ?config.manifest.path,
            remote = %config.git.remote,
            force = config.git.force,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Status(args)) => {
            args.execute(&config)?;
        }
        Some(Commands::Update(args)) => {
            args.execute(&config)?;
        }
        Some(Commands::Gitignore(args)) => {
            args.execute(&config)?;
        }
        Some(Commands::Config) => {
            println!("gitproject Configuration");
            println!("========================");
            println!();
            println!("Manifest:");
            println!("  file_name: {}", config.manifest.file_name);
            match &config.manifest.path {
                Some(path) => println!("  path: {}", path.display()),
                None => println!("  path: (search upward)"),
            }
            println!("Ignore:");
            println!("  file_name: {}", config.ignore.file_name);
            println!("Git:");
            println!("  remote: {}", config.git.remote);
            println!("  git_path: {}", config.git.git_path);
            println!("  force: {}", config.git.force);
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        Some(Commands::Version) => {
            println!("gitproject {}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            println!("gitproject - manage the external git modules of a project");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_aliases() {
        let cli = Cli::try_parse_from(["gitproject", "u", "--force"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Update(args)) if args.force));

        let cli = Cli::try_parse_from(["gitproject", "s", "core", "docs"]).unwrap();
        match cli.command {
            Some(Commands::Status(args)) => assert_eq!(args.modules, vec!["core", "docs"]),
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["gitproject", "g"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Gitignore(_))));
    }

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(false, None).to_string(), "info");
        assert_eq!(log_filter(false, Some("warn".to_string())).to_string(), "warn");
        assert_eq!(log_filter(true, Some("warn".to_string())).to_string(), "debug");
    }

    #[test]
    fn test_manifest_flag_has_no_env_fallback() {
        // GITPROJECT_MANIFEST is applied by Config, not by the parser
        let command = Cli::command();
        let manifest = command
            .get_arguments()
            .find(|arg| arg.get_id() == "manifest")
            .unwrap();
        assert!(manifest.get_env().is_none());
    }

    #[test]
    fn test_global_manifest_flag() {
        let cli = Cli::try_parse_from(["gitproject", "status", "--manifest", "conf/modules.json"])
            .unwrap();
        assert_eq!(cli.manifest, Some(PathBuf::from("conf/modules.json")));
    }
}
