//! Stored fingerprint and the rebuild decision

use std::path::{Path, PathBuf};

use overwatch_fs::{ProjectLayout, io};

use crate::error::Result;
use crate::fingerprint::{BuildFingerprint, fingerprint};

/// Skip only when nothing changed and the previous bundle is still there.
pub fn should_build(
    current: &BuildFingerprint,
    cached: Option<&BuildFingerprint>,
    artifact_present: bool,
) -> bool {
    !(cached == Some(current) && artifact_present)
}

/// Read the stored fingerprint. Missing or blank files yield `None`.
pub fn read_fingerprint(path: &Path) -> Result<Option<BuildFingerprint>> {
    Ok(io::read_text_if_exists(path)?
        .as_deref()
        .and_then(BuildFingerprint::parse))
}

/// Replace the stored fingerprint with `value`, unformatted.
pub fn persist_fingerprint(value: &BuildFingerprint, path: &Path) -> Result<()> {
    io::write_atomic(path, value.as_str().as_bytes())?;
    tracing::debug!(path = %path.display(), "stored interface fingerprint");
    Ok(())
}

/// Everything the rebuild decision looks at.
#[derive(Debug, Clone)]
pub struct BuildCache {
    pub source_tree: PathBuf,
    pub manifests: Vec<PathBuf>,
    pub fingerprint_path: PathBuf,
    pub artifact_path: PathBuf,
}

impl BuildCache {
    pub fn from_layout(layout: &ProjectLayout) -> Self {
        Self {
            source_tree: layout.interface_sources(),
            manifests: layout.interface_manifests(),
            fingerprint_path: layout.fingerprint_path(),
            artifact_path: layout.artifact_path(),
        }
    }

    pub fn current(&self) -> Result<BuildFingerprint> {
        fingerprint(&self.source_tree, &self.manifests)
    }

    pub fn cached(&self) -> Result<Option<BuildFingerprint>> {
        read_fingerprint(&self.fingerprint_path)
    }

    pub fn artifact_present(&self) -> bool {
        self.artifact_path.exists()
    }

    pub fn persist(&self, value: &BuildFingerprint) -> Result<()> {
        persist_fingerprint(value, &self.fingerprint_path)
    }
}
