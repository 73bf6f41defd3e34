//! Fingerprint-gated builds of the Overwatch web interface
//!
//! [`maybe_build`] hashes the interface sources, compares the digest with
//! the one stored after the last successful build, and only invokes the
//! external toolchain when something changed or the bundle is missing. The
//! stored digest is only replaced after a build succeeds.

pub mod cache;
pub mod error;
pub mod fingerprint;
pub mod hook;
pub mod toolchain;

pub use cache::{BuildCache, persist_fingerprint, read_fingerprint, should_build};
pub use error::{Error, Result};
pub use fingerprint::{BuildFingerprint, fingerprint};
pub use hook::{InterfaceHook, PrePackageHook};
pub use toolchain::{BuildStep, NpmToolchain, Toolchain, build};

/// What [`maybe_build`] decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Sources unchanged and the bundle is present
    Skipped(BuildFingerprint),
    /// The toolchain ran and the new fingerprint was stored
    Built(BuildFingerprint),
}

/// Build the interface if its fingerprint changed or the bundle is missing.
///
/// `force` builds regardless. A failed build returns the error and leaves
/// the stored fingerprint untouched.
pub fn maybe_build(
    cache: &BuildCache,
    toolchain: &dyn Toolchain,
    force: bool,
) -> Result<BuildOutcome> {
    let current = cache.current()?;
    let cached = cache.cached()?;
    let artifact_present = cache.artifact_present();

    if !force && !should_build(&current, cached.as_ref(), artifact_present) {
        tracing::info!(fingerprint = %current, "interface unchanged, skipping build");
        return Ok(BuildOutcome::Skipped(current));
    }

    tracing::info!(
        forced = force,
        changed = cached.as_ref() != Some(&current),
        artifact_present,
        "interface build required"
    );
    build(toolchain)?;
    cache.persist(&current)?;
    tracing::info!("interface build complete");
    Ok(BuildOutcome::Built(current))
}
