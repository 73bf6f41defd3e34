//! Pre-packaging hook
//!
//! Build orchestrators that package a filesystem image call a
//! [`PrePackageHook`] first. An error must abort packaging.

use crate::cache::BuildCache;
use crate::error::Result;
use crate::toolchain::Toolchain;
use crate::{BuildOutcome, maybe_build};

/// Callback run before the filesystem image is packaged.
pub trait PrePackageHook {
    fn before_package(&self) -> Result<()>;
}

impl<F> PrePackageHook for F
where
    F: Fn() -> Result<()>,
{
    fn before_package(&self) -> Result<()> {
        self()
    }
}

/// Rebuilds the web interface when its sources changed.
pub struct InterfaceHook<T> {
    pub cache: BuildCache,
    pub toolchain: T,
    pub force: bool,
}

impl<T: Toolchain> InterfaceHook<T> {
    pub fn new(cache: BuildCache, toolchain: T) -> Self {
        Self {
            cache,
            toolchain,
            force: false,
        }
    }

    pub fn run(&self) -> Result<BuildOutcome> {
        maybe_build(&self.cache, &self.toolchain, self.force)
    }
}

impl<T: Toolchain> PrePackageHook for InterfaceHook<T> {
    fn before_package(&self) -> Result<()> {
        self.run().map(|_| ())
    }
}
