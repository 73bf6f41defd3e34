//! External interface toolchain
//!
//! The bundler is opaque: it is started as a subprocess and only its exit
//! status is inspected. Output goes straight to the operator's terminal.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use overwatch_fs::ProjectLayout;

use crate::error::{Error, Result};

/// Which toolchain step was running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    InstallDependencies,
    Bundle,
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InstallDependencies => write!(f, "dependency install"),
            Self::Bundle => write!(f, "build"),
        }
    }
}

/// The two operations a bundling toolchain must offer.
pub trait Toolchain {
    /// Whether the dependency cache is already populated.
    fn dependencies_installed(&self) -> bool;

    fn install_deps(&self) -> Result<()>;

    fn run_build(&self) -> Result<()>;
}

/// Install dependencies when the cache marker is missing, then build.
///
/// The first failing step aborts.
pub fn build(toolchain: &dyn Toolchain) -> Result<()> {
    if !toolchain.dependencies_installed() {
        tracing::info!("installing interface dependencies");
        toolchain.install_deps()?;
    }
    tracing::info!("building interface");
    toolchain.run_build()
}

/// `npm`-style toolchain run inside the interface directory.
#[derive(Debug, Clone)]
pub struct NpmToolchain {
    pub program: String,
    pub working_dir: PathBuf,
    pub dependency_marker: PathBuf,
    pub install_args: Vec<String>,
    pub build_args: Vec<String>,
}

impl NpmToolchain {
    pub fn from_layout(layout: &ProjectLayout) -> Self {
        let interface = &layout.config.interface;
        Self {
            program: interface.npm.clone(),
            working_dir: layout.interface_dir(),
            dependency_marker: layout.dependency_cache(),
            install_args: interface.install_args.clone(),
            build_args: interface.build_args.clone(),
        }
    }
}

impl Toolchain for NpmToolchain {
    fn dependencies_installed(&self) -> bool {
        self.dependency_marker.is_dir()
    }

    fn install_deps(&self) -> Result<()> {
        run_step(
            BuildStep::InstallDependencies,
            &self.program,
            &self.install_args,
            &self.working_dir,
        )
    }

    fn run_build(&self) -> Result<()> {
        run_step(
            BuildStep::Bundle,
            &self.program,
            &self.build_args,
            &self.working_dir,
        )
    }
}

/// Run `program args...` in `working_dir`, mapping a non-zero exit to
/// [`Error::BuildFailed`].
pub fn run_step(step: BuildStep, program: &str, args: &[String], working_dir: &Path) -> Result<()> {
    let command = command_line(program, args);
    tracing::debug!(%command, dir = %working_dir.display(), "running toolchain step");

    let status = Command::new(program)
        .args(args)
        .current_dir(working_dir)
        .status()
        .map_err(|source| Error::Spawn {
            command: command.clone(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::BuildFailed {
            step,
            command,
            code: status.code(),
        })
    }
}

fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
