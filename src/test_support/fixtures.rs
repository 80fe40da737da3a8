//! Workspace fixtures for common test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Compiler options every fixture package config starts with.
pub const PACKAGE_TSCONFIG: &str = r#"{
  "compilerOptions": {
    "outDir": "dist",
    "rootDir": "src"
  }
}
"#;

/// Root config of the fixture workspaces.
pub const ROOT_TSCONFIG: &str = r#"{
  "compilerOptions": {
    "composite": true
  },
  "files": []
}
"#;

/// Builder for an on-disk workspace.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceFixture {
    packages: Vec<(PathBuf, String)>,
    files: Vec<(PathBuf, String)>,
}

impl WorkspaceFixture {
    /// Create an empty fixture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package directory with the given `package.json` content.
    pub fn package(mut self, dir: impl AsRef<Path>, manifest: &str) -> Self {
        self.packages
            .push((dir.as_ref().to_path_buf(), manifest.to_string()));
        self
    }

    /// Add a `tsconfig.json` to a directory (`""` for the root).
    pub fn tsconfig(self, dir: impl AsRef<Path>, content: &str) -> Self {
        let path = dir.as_ref().join("tsconfig.json");
        self.file(path, content)
    }

    /// Add an arbitrary file.
    pub fn file(mut self, path: impl AsRef<Path>, content: &str) -> Self {
        self.files.push((path.as_ref().to_path_buf(), content.to_string()));
        self
    }

    /// The layout of the original yarn workspace scenario: six packages spread
    /// over three directory depths, each with a config document.
    pub fn yarn_workspace() -> Self {
        WorkspaceFixture::new()
            .file(
                "package.json",
                r#"{
  "name": "root",
  "private": true,
  "workspaces": ["workspace-a", "workspace-b", "shared/*", "utils/**"]
}
"#,
            )
            .tsconfig("", ROOT_TSCONFIG)
            .package(
                "workspace-a",
                r#"{
                    "name": "workspace-a",
                    "dependencies": { "workspace-b": "1.0.0" },
                    "devDependencies": { "foo-a": "1.0.0" }
                }"#,
            )
            .package(
                "workspace-b",
                r#"{
                    "name": "workspace-b",
                    "dependencies": { "cross-env": "5.0.5" },
                    "peerDependencies": { "foo-b": "1.0.0" }
                }"#,
            )
            .package(
                "shared/workspace-c",
                r#"{ "name": "workspace-c", "dependencies": { "foo-a": "1.0.0" } }"#,
            )
            .package(
                "shared/workspace-d",
                r#"{ "name": "workspace-d", "dependencies": { "workspace-c": "1.0.0" } }"#,
            )
            .package(
                "utils/foos/foo-a",
                r#"{ "name": "foo-a", "dependencies": { "foo-b": "1.0.0" } }"#,
            )
            .package("utils/foos/foo-b", r#"{ "name": "foo-b" }"#)
            .tsconfig("workspace-a", PACKAGE_TSCONFIG)
            .tsconfig("workspace-b", PACKAGE_TSCONFIG)
            .tsconfig("shared/workspace-c", PACKAGE_TSCONFIG)
            .tsconfig("shared/workspace-d", PACKAGE_TSCONFIG)
            .tsconfig("utils/foos/foo-a", PACKAGE_TSCONFIG)
            .tsconfig("utils/foos/foo-b", PACKAGE_TSCONFIG)
    }

    /// Write everything to a fresh temporary directory.
    pub fn create(self) -> TempWorkspace {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();

        let mut manifests = Vec::new();
        for (pkg_dir, manifest) in &self.packages {
            let path = root.join(pkg_dir).join("package.json");
            write(&path, manifest);
            manifests.push(path);
        }
        for (path, content) in &self.files {
            write(&root.join(path), content);
        }

        TempWorkspace {
            _dir: dir,
            root,
            manifests,
        }
    }
}

/// A fixture written to disk. Removed when dropped.
#[derive(Debug)]
pub struct TempWorkspace {
    _dir: TempDir,
    root: PathBuf,
    manifests: Vec<PathBuf>,
}

impl TempWorkspace {
    /// Canonical workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute manifest paths, in the order the packages were added.
    pub fn manifests(&self) -> Vec<PathBuf> {
        self.manifests.clone()
    }

    /// Absolute path of a workspace-relative path.
    pub fn path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.root.join(rel)
    }

    /// Read a workspace-relative file.
    pub fn read(&self, rel: impl AsRef<Path>) -> String {
        fs::read_to_string(self.path(rel)).unwrap()
    }

    /// Overwrite a workspace-relative file.
    pub fn write(&self, rel: impl AsRef<Path>, content: &str) {
        write(&self.path(rel), content);
    }

    /// Parse a workspace-relative JSONC file into a value.
    pub fn json(&self, rel: impl AsRef<Path>) -> serde_json::Value {
        crate::util::jsonc::parse_value(&self.read(rel)).unwrap()
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
