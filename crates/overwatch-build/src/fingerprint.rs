//! Content fingerprints for the interface sources
//!
//! A fingerprint is the SHA-256 of every file under the source tree, visited
//! in file-name order at each level, followed by each manifest that exists.
//! Only bytes are hashed: timestamps and permissions never affect it.

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use overwatch_fs::Error as FsError;
use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::error::Result;

/// Prefix of every rendered fingerprint
const PREFIX: &str = "sha256:";

/// Digest that decides whether the interface needs rebuilding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildFingerprint(String);

impl BuildFingerprint {
    /// Wrap a stored value. Surrounding whitespace is ignored; empty input
    /// yields `None`.
    pub fn parse(stored: &str) -> Option<Self> {
        let trimmed = stored.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Files under `source_tree` in hashing order. A missing tree is empty.
pub fn source_files(source_tree: &Path) -> Result<Vec<PathBuf>> {
    if !source_tree.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(source_tree).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| source_tree.to_path_buf());
            FsError::io(path, e.into())
        })?;
        if entry.path().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Compute the fingerprint over `source_tree` and then `manifests`.
pub fn fingerprint(source_tree: &Path, manifests: &[PathBuf]) -> Result<BuildFingerprint> {
    let mut hasher = Sha256::new();

    let sources = source_files(source_tree)?;
    for path in &sources {
        hash_file(&mut hasher, path)?;
    }

    let mut manifest_count = 0;
    for path in manifests.iter().filter(|p| p.is_file()) {
        hash_file(&mut hasher, path)?;
        manifest_count += 1;
    }

    let digest = BuildFingerprint(format!("{}{:x}", PREFIX, hasher.finalize()));
    tracing::debug!(
        sources = sources.len(),
        manifests = manifest_count,
        %digest,
        "computed interface fingerprint"
    );
    Ok(digest)
}

fn hash_file(hasher: &mut Sha256, path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| FsError::io(path, e))?;
    std::io::copy(&mut file, hasher).map_err(|e| FsError::io(path, e))?;
    Ok(())
}
