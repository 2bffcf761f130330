//! Network operations through the `git` executable
//!
//! Fetch, pull and clone go through the installed `git` binary so that the
//! user's transport setup (SSH agent, credential helpers, proxies) applies
//! unchanged.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use super::error::{AdapterError, AdapterResult};

/// Runs `git` subcommands
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    /// Use the `git` found on `PATH`
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    /// Use a specific git executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// The executable being invoked
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Check whether the executable can be started
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Fetch `remote`, updating its remote-tracking refs
    pub fn fetch(&self, workdir: &Path, remote: &str) -> AdapterResult<()> {
        self.run(Some(workdir), ["fetch", remote])?;
        Ok(())
    }

    /// Merge `remote`/`branch` into the current branch
    pub fn pull(&self, workdir: &Path, remote: &str, branch: &str) -> AdapterResult<()> {
        self.run(Some(workdir), ["pull", "--no-rebase", remote, branch])?;
        Ok(())
    }

    /// Clone `url` into `dest` with `branch` checked out
    pub fn clone_repo(&self, url: &str, dest: &Path, branch: &str) -> AdapterResult<()> {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }

        self.run(
            None,
            [
                OsStr::new("clone"),
                OsStr::new("--branch"),
                OsStr::new(branch),
                OsStr::new("--"),
                OsStr::new(url),
                dest.as_os_str(),
            ],
        )?;
        Ok(())
    }

    /// Run git with `args`, returning stdout
    ///
    /// A non-zero exit becomes [`AdapterError::Command`] carrying git's stderr.
    pub fn run<I, S>(&self, workdir: Option<&Path>, args: I) -> AdapterResult<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let mut cmd = Command::new(&self.program);
        cmd.args(&args);
        if let Some(dir) = workdir {
            cmd.current_dir(dir);
        }

        let command_line = std::iter::once(self.program.clone())
            .chain(args.iter().map(|a| a.as_ref().to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ");
        tracing::debug!(command = %command_line, "Running git");

        let output = cmd.output().map_err(|source| AdapterError::GitUnavailable {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AdapterError::Command {
                command: command_line,
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}
