//! Project layout resolution

use std::path::{Path, PathBuf};

use crate::{Result, ToolConfig};

/// Absolute locations of everything the tooling touches, resolved from a
/// project root and its [`ToolConfig`].
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub config: ToolConfig,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>, config: ToolConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Resolve the layout for `root`, reading `overwatch.toml` if present.
    pub fn discover(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let config = ToolConfig::load(&root)?;
        Ok(Self { root, config })
    }

    pub fn archive_path(&self) -> PathBuf {
        self.root.join(&self.config.paths.archive)
    }

    pub fn staged_path(&self) -> PathBuf {
        self.root.join(&self.config.paths.staged)
    }

    pub fn interface_dir(&self) -> PathBuf {
        self.root.join(&self.config.interface.dir)
    }

    pub fn interface_sources(&self) -> PathBuf {
        self.interface_dir().join(&self.config.interface.sources)
    }

    /// Manifest files in hashing order, whether or not they exist.
    pub fn interface_manifests(&self) -> Vec<PathBuf> {
        let dir = self.interface_dir();
        self.config
            .interface
            .manifests
            .iter()
            .map(|name| dir.join(name))
            .collect()
    }

    pub fn fingerprint_path(&self) -> PathBuf {
        self.interface_dir().join(&self.config.interface.fingerprint)
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.root.join(&self.config.interface.artifact)
    }

    pub fn dependency_cache(&self) -> PathBuf {
        self.interface_dir()
            .join(&self.config.interface.dependency_cache)
    }

    pub fn lib_dir(&self) -> PathBuf {
        self.root.join(&self.config.libs.dir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
