//! Library tidy command implementation

use std::fs;
use std::path::Path;

use colored::Colorize;
use overwatch_fs::ProjectLayout;

use crate::error::Result;

/// Move each listed directory found in `root` into `lib_dir`.
///
/// An existing directory of the same name in `lib_dir` is replaced. Returns
/// the names that were moved, sorted.
pub fn tidy_libs(root: &Path, lib_dir: &Path, names: &[String]) -> Result<Vec<String>> {
    let mut names: Vec<&String> = names.iter().collect();
    names.sort();
    names.dedup();

    let mut moved = Vec::new();
    for name in names {
        let source = root.join(name);
        if !source.is_dir() {
            continue;
        }

        fs::create_dir_all(lib_dir)?;
        let target = lib_dir.join(name);
        if target.is_dir() {
            fs::remove_dir_all(&target)?;
        } else if target.exists() {
            fs::remove_file(&target)?;
        }
        fs::rename(&source, &target)?;
        tracing::debug!(from = %source.display(), to = %target.display(), "moved library");
        moved.push(name.clone());
    }
    Ok(moved)
}

/// Run the tidy-libs command
pub fn run_tidy_libs(layout: &ProjectLayout) -> Result<Vec<String>> {
    let lib_dir = layout.lib_dir();
    let moved = tidy_libs(layout.root(), &lib_dir, &layout.config.libs.names)?;

    for name in &moved {
        println!("  {} {}", "→".cyan(), name);
    }
    if moved.is_empty() {
        println!("{}", "No stray libraries found".dimmed());
    } else {
        println!(
            "{} Moved {} libraries into {}",
            "✓".green(),
            moved.len(),
            lib_dir.display()
        );
    }
    Ok(moved)
}
