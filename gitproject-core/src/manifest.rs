//! Project manifest loading
//!
//! The manifest is a JSON document listing the modules of a project:
//!
//! ```json
//! {
//!   "modules": [
//!     { "name": "lib", "path": "deps/lib", "url": "https://example.com/lib.git",
//!       "branch": "main", "commit": "4f2a9c1" }
//!   ]
//! }
//! ```
//!
//! The directory holding the manifest is the project root. Module paths and
//! the ignore file are resolved against it; nothing changes the process
//! working directory.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::ManifestConfig;
use crate::{Error, Result};

fn default_branch() -> String {
    "master".to_string()
}

/// Lexically normalize a relative module path
///
/// `.` components are dropped and `..` cancels the preceding named
/// component, so `lib`, `./lib` and `x/../lib` all become `lib`. Leading
/// `..` components are kept. The filesystem is not consulted.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir if matches!(parts.last(), Some(Component::Normal(_))) => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}

/// One externally managed checkout declared in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModuleSpec {
    /// Display name
    pub name: String,

    /// Checkout location relative to the project root; the module's identity
    pub path: PathBuf,

    /// Remote to clone from
    pub url: String,

    /// Branch to track
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Revision to pin the checkout to, overriding the branch tip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

impl ModuleSpec {
    /// Create a module tracking `master`
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            url: url.into(),
            branch: default_branch(),
            commit: None,
        }
    }

    /// Track a different branch
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Pin to a revision
    pub fn with_commit(mut self, commit: impl Into<String>) -> Self {
        self.commit = Some(commit.into());
        self
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.name.trim().is_empty() {
            return Err(format!("module at '{}' has an empty name", self.path.display()));
        }
        if self.path.as_os_str().is_empty() {
            return Err(format!("module '{}' has an empty path", self.name));
        }
        if self.path.is_absolute() {
            return Err(format!(
                "module '{}' path must be relative to the project root: {}",
                self.name,
                self.path.display()
            ));
        }
        if normalize_path(&self.path).as_os_str().is_empty() {
            return Err(format!(
                "module '{}' path resolves to the project root: {}",
                self.name,
                self.path.display()
            ));
        }
        if self.url.trim().is_empty() {
            return Err(format!("module '{}' has an empty url", self.name));
        }
        if self.branch.trim().is_empty() {
            return Err(format!("module '{}' has an empty branch", self.name));
        }
        if matches!(&self.commit, Some(c) if c.trim().is_empty()) {
            return Err(format!("module '{}' has an empty commit", self.name));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ManifestFile {
    modules: Vec<ModuleSpec>,
}

/// A loaded, validated manifest
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Manifest file location
    path: PathBuf,
    /// Project root (directory containing the manifest)
    root: PathBuf,
    /// Declared modules, in manifest order
    modules: Vec<ModuleSpec>,
}

impl Manifest {
    /// Search `start` and each of its parents for `file_name`
    pub fn find(start: &Path, file_name: &str) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(file_name))
            .find(|candidate| candidate.is_file())
    }

    /// Locate the manifest by searching upward from `start`, then load it
    pub fn discover(start: &Path, file_name: &str) -> Result<Self> {
        let path = Self::find(start, file_name).ok_or_else(|| {
            Error::ManifestMissing(format!(
                "no {} in {} or any parent directory",
                file_name,
                start.display()
            ))
        })?;

        tracing::debug!(manifest = %path.display(), "Found manifest");
        Self::load(&path)
    }

    /// Locate the manifest as configured
    ///
    /// An explicit `path` wins (resolved against `cwd` when relative);
    /// otherwise `file_name` is searched upward from `cwd`.
    pub fn locate(config: &ManifestConfig, cwd: &Path) -> Result<Self> {
        match &config.path {
            Some(path) => Self::load(&cwd.join(path)),
            None => Self::discover(cwd, &config.file_name),
        }
    }

    /// Load and validate the manifest at `path`
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ManifestMissing(format!("{} does not exist", path.display())));
        }

        let contents = std::fs::read_to_string(path)?;
        Self::from_json(path, &contents)
    }

    /// Parse manifest contents that were read from `path`
    pub fn from_json(path: &Path, contents: &str) -> Result<Self> {
        let invalid = |message: String| Error::ManifestInvalid {
            path: path.to_path_buf(),
            message,
        };

        let file: ManifestFile = serde_json::from_str(contents).map_err(|e| invalid(e.to_string()))?;

        // Different spellings of one path name the same checkout
        let mut seen = HashSet::new();
        for module in &file.modules {
            module.validate().map_err(&invalid)?;
            if !seen.insert(normalize_path(&module.path)) {
                return Err(invalid(format!(
                    "path '{}' is declared by more than one module",
                    module.path.display()
                )));
            }
        }

        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Self {
            path: path.to_path_buf(),
            root,
            modules: file.modules,
        })
    }

    /// Manifest file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Project root every module path is relative to
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Declared modules, in manifest order
    pub fn modules(&self) -> &[ModuleSpec] {
        &self.modules
    }

    /// Modules restricted to `names`, in manifest order
    ///
    /// An empty filter selects every module.
    pub fn select(&self, names: &[String]) -> Result<Vec<&ModuleSpec>> {
        if let Some(unknown) = names
            .iter()
            .find(|name| !self.modules.iter().any(|m| &m.name == *name))
        {
            return Err(Error::Config(format!("Unknown module: {}", unknown)));
        }

        Ok(self
            .modules
            .iter()
            .filter(|m| names.is_empty() || names.contains(&m.name))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"{
        "modules": [
            { "name": "core", "path": "deps/core", "url": "https://example.com/core.git", "branch": "main" },
            { "name": "docs", "path": "docs", "url": "git@example.com:org/docs.git", "commit": "4f2a9c1" }
        ]
    }"#;

    #[test]
    fn test_parse_modules() {
        let manifest = Manifest::from_json(Path::new("/work/app/.gitproject"), MANIFEST).unwrap();

        assert_eq!(manifest.root(), Path::new("/work/app"));
        assert_eq!(manifest.modules().len(), 2);

        let core = &manifest.modules()[0];
        assert_eq!(core.name, "core");
        assert_eq!(core.branch, "main");
        assert!(core.commit.is_none());
        assert_eq!(core.path, PathBuf::from("deps/core"));

        let docs = &manifest.modules()[1];
        assert_eq!(docs.branch, "master");
        assert_eq!(docs.commit.as_deref(), Some("4f2a9c1"));
    }

    #[test]
    fn test_relative_manifest_path_root() {
        let manifest = Manifest::from_json(Path::new(".gitproject"), r#"{"modules": []}"#).unwrap();
        assert_eq!(manifest.root(), Path::new("."));
    }

    #[test]
    fn test_missing_required_field() {
        let result = Manifest::from_json(
            Path::new(".gitproject"),
            r#"{"modules": [{"name": "core", "path": "core"}]}"#,
        );
        match result {
            Err(Error::ManifestInvalid { message, .. }) => assert!(message.contains("url")),
            other => panic!("expected invalid manifest, got {other:?}"),
        }
    }

    #[test]
    fn test_not_json() {
        let result = Manifest::from_json(Path::new(".gitproject"), "modules:\n  - core\n");
        assert!(matches!(result, Err(Error::ManifestInvalid { .. })));
    }

    #[test]
    fn test_duplicate_paths_rejected() {
        let result = Manifest::from_json(
            Path::new(".gitproject"),
            r#"{"modules": [
                {"name": "a", "path": "lib", "url": "https://example.com/a.git"},
                {"name": "b", "path": "lib", "url": "https://example.com/b.git"}
            ]}"#,
        );
        match result {
            Err(Error::ManifestInvalid { message, .. }) => assert!(message.contains("lib")),
            other => panic!("expected invalid manifest, got {other:?}"),
        }
    }

    #[test]
    fn test_equivalent_path_spellings_rejected() {
        for alias in ["./lib", "x/../lib", "lib/", "lib/."] {
            let contents = format!(
                r#"{{"modules": [
                    {{"name": "a", "path": "lib", "url": "https://example.com/a.git"}},
                    {{"name": "b", "path": "{}", "url": "https://example.com/b.git"}}
                ]}}"#,
                alias
            );
            let result = Manifest::from_json(Path::new(".gitproject"), &contents);
            assert!(
                matches!(result, Err(Error::ManifestInvalid { .. })),
                "alias {alias} was accepted"
            );
        }
    }

    #[test]
    fn test_project_root_as_module_rejected() {
        for path in [".", "./", "lib/..", "a/b/../.."] {
            let contents = format!(
                r#"{{"modules": [{{"name": "self", "path": "{}", "url": "https://example.com/a.git"}}]}}"#,
                path
            );
            match Manifest::from_json(Path::new(".gitproject"), &contents) {
                Err(Error::ManifestInvalid { message, .. }) => {
                    assert!(message.contains("project root"), "{message}")
                }
                other => panic!("path {path} accepted: {other:?}"),
            }
        }
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("./deps/./core")), PathBuf::from("deps/core"));
        assert_eq!(normalize_path(Path::new("x/../lib")), PathBuf::from("lib"));
        assert_eq!(normalize_path(Path::new("../shared/lib")), PathBuf::from("../shared/lib"));
        assert_eq!(normalize_path(Path::new("../../a/..")), PathBuf::from("../.."));
        assert!(normalize_path(Path::new("lib/..")).as_os_str().is_empty());
    }

    #[test]
    fn test_absolute_path_rejected() {
        let result = Manifest::from_json(
            Path::new(".gitproject"),
            r#"{"modules": [{"name": "a", "path": "/opt/lib", "url": "https://example.com/a.git"}]}"#,
        );
        assert!(matches!(result, Err(Error::ManifestInvalid { .. })));
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = Manifest::from_json(
            Path::new(".gitproject"),
            r#"{"modules": [{"name": "a", "path": "lib", "url": "  "}]}"#,
        );
        assert!(matches!(result, Err(Error::ManifestInvalid { .. })));
    }

    #[test]
    fn test_discover_searches_upward() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".gitproject"), MANIFEST).unwrap();
        let nested = temp.path().join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();

        let manifest = Manifest::discover(&nested, ".gitproject").unwrap();
        assert_eq!(manifest.root(), temp.path());
        assert_eq!(manifest.path(), temp.path().join(".gitproject"));
    }

    #[test]
    fn test_discover_missing() {
        let temp = TempDir::new().unwrap();
        let result = Manifest::discover(temp.path(), ".gitproject-test-absent");
        assert!(matches!(result, Err(Error::ManifestMissing(_))));
    }

    #[test]
    fn test_locate_explicit_path() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("conf")).unwrap();
        std::fs::write(temp.path().join("conf").join("modules.json"), MANIFEST).unwrap();

        let config = ManifestConfig {
            path: Some(PathBuf::from("conf/modules.json")),
            ..ManifestConfig::default()
        };
        let manifest = Manifest::locate(&config, temp.path()).unwrap();
        assert_eq!(manifest.root(), temp.path().join("conf"));

        let config = ManifestConfig {
            path: Some(PathBuf::from("missing.json")),
            ..ManifestConfig::default()
        };
        assert!(matches!(
            Manifest::locate(&config, temp.path()),
            Err(Error::ManifestMissing(_))
        ));
    }

    #[test]
    fn test_select() {
        let manifest = Manifest::from_json(Path::new(".gitproject"), MANIFEST).unwrap();

        assert_eq!(manifest.select(&[]).unwrap().len(), 2);

        let only_docs = manifest.select(&["docs".to_string()]).unwrap();
        assert_eq!(only_docs.len(), 1);
        assert_eq!(only_docs[0].name, "docs");

        assert!(matches!(
            manifest.select(&["nope".to_string()]),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_builder() {
        let module = ModuleSpec::new("lib", "deps/lib", "https://example.com/lib.git")
            .with_branch("main")
            .with_commit("abc123");
        assert_eq!(module.branch, "main");
        assert_eq!(module.commit.as_deref(), Some("abc123"));
        assert!(module.validate().is_ok());
    }
}
