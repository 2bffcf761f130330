//! Configuration management for gitproject
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (GITPROJECT_*)
//! 3. Config file (~/.config/gitproject/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Manifest lookup settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// File name searched for upward from the current directory
    pub file_name: String,

    /// Explicit manifest path, bypassing the upward search
    pub path: Option<PathBuf>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            file_name: ".gitproject".to_string(),
            path: None,
        }
    }
}

/// Ignore-list settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Ignore file, relative to the project root
    pub file_name: String,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            file_name: ".gitignore".to_string(),
        }
    }
}

/// Git-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitConfig {
    /// Remote that modules are fetched from and pulled from
    pub remote: String,

    /// Path to the git executable
    pub git_path: String,

    /// Discard local modifications and untracked files when updating
    pub force: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            git_path: "git".to_string(),
            force: false,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Manifest configuration
    pub manifest: ManifestConfig,

    /// Ignore-list configuration
    pub ignore: IgnoreConfig,

    /// Git configuration
    pub git: GitConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/gitproject/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gitproject").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - GITPROJECT_MANIFEST: Explicit manifest path
    /// - GITPROJECT_REMOTE: Remote to fetch and pull from
    /// - GITPROJECT_FORCE: Discard local modifications on update ("1" or "true")
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup("GITPROJECT_MANIFEST") {
            self.manifest.path = Some(PathBuf::from(path));
        }

        if let Some(remote) = lookup("GITPROJECT_REMOTE") {
            self.git.remote = remote;
        }

        if let Some(force) = lookup("GITPROJECT_FORCE") {
            self.git.force = matches!(force.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, manifest: Option<PathBuf>, force: bool) -> Self {
        if let Some(path) = manifest {
            self.manifest.path = Some(path);
        }

        if force {
            self.git.force = true;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(manifest: Option<PathBuf>, force: bool) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(manifest, force))
    }
}
