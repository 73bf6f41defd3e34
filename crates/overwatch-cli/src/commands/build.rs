//! Interface build command implementation

use colored::Colorize;
use overwatch_build::{BuildCache, BuildOutcome, InterfaceHook, NpmToolchain};
use overwatch_fs::ProjectLayout;

use crate::error::Result;

/// Build the interface for `layout` with the configured npm toolchain.
pub fn interface_hook(layout: &ProjectLayout, force: bool) -> InterfaceHook<NpmToolchain> {
    let mut hook = InterfaceHook::new(
        BuildCache::from_layout(layout),
        NpmToolchain::from_layout(layout),
    );
    hook.force = force;
    hook
}

/// Run the build-interface command
pub fn run_build_interface(layout: &ProjectLayout, force: bool) -> Result<BuildOutcome> {
    let outcome = interface_hook(layout, force).run()?;
    match &outcome {
        BuildOutcome::Skipped(_) => {
            println!("{}", "Interface unchanged, skipping build".dimmed());
        }
        BuildOutcome::Built(_) => {
            println!("{} Interface build complete", "✓".green());
        }
    }
    Ok(outcome)
}
