//! Ignore-list maintenance
//!
//! Module checkouts live inside the project tree but are not part of the
//! project's own history, so their paths are added to the project's ignore
//! file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::manifest::normalize_path;
use crate::Result;

/// What an ignore-list sync did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreSync {
    /// The file did not exist and was created with these entries
    Created { added: Vec<String> },
    /// These entries were appended to the existing file
    Updated { added: Vec<String> },
    /// Every entry was already present
    Unchanged,
}

/// Render a module path as an ignore entry (normalized, forward slashes)
pub fn ignore_entry(path: &Path) -> String {
    normalize_path(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Append each of `paths` to the ignore file unless already listed
///
/// Existing content is preserved byte-for-byte; new entries are appended in
/// the given order, each at most once.
pub fn sync_ignore_file(file: &Path, paths: &[PathBuf]) -> Result<IgnoreSync> {
    let existing = match fs::read_to_string(file) {
        Ok(contents) => Some(contents),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(e.into()),
    };

    let present: Vec<&str> = existing
        .as_deref()
        .map(|contents| contents.lines().map(str::trim).collect())
        .unwrap_or_default();

    let mut added: Vec<String> = Vec::new();
    for path in paths {
        let entry = ignore_entry(path);
        if !present.contains(&entry.as_str()) && !added.contains(&entry) {
            added.push(entry);
        }
    }

    match existing {
        None => {
            let contents: String = added.iter().map(|entry| format!("{}\n", entry)).collect();
            fs::write(file, contents)?;
            tracing::info!(file = %file.display(), count = added.len(), "Created ignore file");
            Ok(IgnoreSync::Created { added })
        }
        Some(_) if added.is_empty() => Ok(IgnoreSync::Unchanged),
        Some(mut contents) => {
            if !contents.is_empty() && !contents.ends_with('\n') {
                contents.push('\n');
            }
            for entry in &added {
                contents.push_str(entry);
                contents.push('\n');
            }
            fs::write(file, contents)?;
            tracing::info!(file = %file.display(), count = added.len(), "Updated ignore file");
            Ok(IgnoreSync::Updated { added })
        }
    }
}
