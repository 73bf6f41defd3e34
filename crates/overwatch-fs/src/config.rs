//! Tool configuration loaded from `overwatch.toml`
//!
//! Every key is optional. A project without the file behaves exactly like
//! one with an empty file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{INTERFACE_MANIFESTS, ProjectPath, STRAY_LIBRARIES};
use crate::{Error, Result, io};

/// Top-level contents of `overwatch.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub device: DeviceSection,
    pub paths: PathsSection,
    pub interface: InterfaceSection,
    pub firmware: FirmwareSection,
    pub libs: LibsSection,
}

/// How the device is reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSection {
    /// Timeout for the configuration fetch, in seconds
    pub timeout_secs: u64,
    /// Environment variable consulted when no address is given
    pub address_env: String,
}

impl Default for DeviceSection {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            address_env: "ESP32_IP".to_string(),
        }
    }
}

/// Project-relative locations of the synchronized documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsSection {
    pub archive: PathBuf,
    pub staged: PathBuf,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            archive: ProjectPath::Archive.as_ref().to_path_buf(),
            staged: ProjectPath::Staged.as_ref().to_path_buf(),
        }
    }
}

/// Web interface build settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceSection {
    /// Interface project directory, relative to the project root
    pub dir: PathBuf,
    /// Source tree, relative to the interface directory
    pub sources: PathBuf,
    /// Manifests hashed after the sources, relative to the interface directory
    pub manifests: Vec<String>,
    /// Fingerprint file, relative to the interface directory
    pub fingerprint: PathBuf,
    /// Build output, relative to the project root
    pub artifact: PathBuf,
    /// Dependency marker, relative to the interface directory
    pub dependency_cache: PathBuf,
    /// Package manager program
    pub npm: String,
    pub install_args: Vec<String>,
    pub build_args: Vec<String>,
}

impl Default for InterfaceSection {
    fn default() -> Self {
        Self {
            dir: ProjectPath::InterfaceDir.as_ref().to_path_buf(),
            sources: ProjectPath::InterfaceSources.as_ref().to_path_buf(),
            manifests: INTERFACE_MANIFESTS.iter().map(|s| s.to_string()).collect(),
            fingerprint: ProjectPath::Fingerprint.as_ref().to_path_buf(),
            artifact: ProjectPath::Artifact.as_ref().to_path_buf(),
            dependency_cache: ProjectPath::DependencyCache.as_ref().to_path_buf(),
            npm: default_npm().to_string(),
            install_args: vec!["install".to_string()],
            build_args: vec!["run".to_string(), "build".to_string()],
        }
    }
}

fn default_npm() -> &'static str {
    if cfg!(windows) { "npm.cmd" } else { "npm" }
}

/// Firmware toolchain settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirmwareSection {
    pub command: String,
}

impl Default for FirmwareSection {
    fn default() -> Self {
        Self {
            command: "pio".to_string(),
        }
    }
}

/// Stray library relocation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibsSection {
    pub dir: PathBuf,
    pub names: Vec<String>,
}

impl Default for LibsSection {
    fn default() -> Self {
        Self {
            dir: ProjectPath::LibDir.as_ref().to_path_buf(),
            names: STRAY_LIBRARIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ToolConfig {
    /// Load `overwatch.toml` from the project root, falling back to defaults
    /// when the file is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(ProjectPath::ToolConfig);
        match io::read_text_if_exists(&path)? {
            Some(content) => Self::parse(&path, &content),
            None => {
                tracing::debug!(path = %path.display(), "no tool config, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse TOML content; `path` is only used for error reporting.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            format: "TOML".into(),
            message: e.to_string(),
        })
    }
}
