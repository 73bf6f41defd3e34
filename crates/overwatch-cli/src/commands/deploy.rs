//! Deploy command implementation
//!
//! Drives the firmware toolchain through build, firmware upload and
//! filesystem upload. The interface hook runs right before the filesystem
//! image is packaged so the uploaded bundle is never stale.

use std::path::Path;
use std::process::Command;

use colored::Colorize;
use overwatch_build::PrePackageHook;
use overwatch_fs::ProjectLayout;
use overwatch_sync::load_staged;

use crate::error::{CliError, Result};

/// How a deploy ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployOutcome {
    Completed,
    /// The operator declined to deploy without a staged config
    Aborted,
}

/// Run the deploy command.
///
/// `confirm` is only asked when no staged config exists.
pub fn run_deploy(
    layout: &ProjectLayout,
    hook: &dyn PrePackageHook,
    confirm: impl FnOnce() -> Result<bool>,
) -> Result<DeployOutcome> {
    let staged_path = layout.staged_path();
    match load_staged(&staged_path)? {
        Some(staged) => {
            println!("{} Staged config found", "✓".green());
            println!("  {}: {}", "WiFi SSID".dimmed(), or_na(&staged.wifi.ssid));
            println!("  {}: {}", "Subnets".dimmed(), staged.subnets.len());
            println!("  {}: {}", "Static hosts".dimmed(), staged.static_hosts.len());
        }
        None => {
            println!(
                "{} No staged config at {}",
                "!".yellow().bold(),
                staged_path.display()
            );
            println!("  The device will boot into first-run setup.");
            if !confirm()? {
                println!("Deploy cancelled");
                return Ok(DeployOutcome::Aborted);
            }
        }
    }

    let program = layout.config.firmware.command.as_str();
    let root = layout.root();

    run_firmware("Firmware build", program, &["run"], root)?;
    run_firmware("Firmware upload", program, &["run", "-t", "upload"], root)?;

    tracing::info!("running pre-package hook");
    hook.before_package()?;

    run_firmware(
        "Filesystem upload",
        program,
        &["run", "-t", "uploadfs"],
        root,
    )?;

    println!("{} Deploy complete", "✓".green());
    Ok(DeployOutcome::Completed)
}

/// Empty values are shown as `N/A`.
pub(crate) fn or_na(value: &str) -> String {
    if value.is_empty() {
        "N/A".dimmed().to_string()
    } else {
        value.to_string()
    }
}

fn run_firmware(step: &str, program: &str, args: &[&str], dir: &Path) -> Result<()> {
    let command = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    println!("{} {}", "→".cyan(), command);
    tracing::debug!(%command, dir = %dir.display(), "running firmware step");

    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .map_err(|source| CliError::FirmwareSpawn {
            command: command.clone(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(CliError::Firmware {
            step: step.to_string(),
            command,
            code: status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overwatch_fs::ToolConfig;
    use overwatch_test_utils::TestProject;
    use std::cell::Cell;

    fn layout_with_command(project: &TestProject, command: &str) -> ProjectLayout {
        let mut config = ToolConfig::default();
        config.firmware.command = command.to_string();
        ProjectLayout::new(project.root(), config)
    }

    fn no_hook() -> overwatch_build::Result<()> {
        Ok(())
    }

    #[test]
    fn test_declining_without_staged_config_aborts() {
        let project = TestProject::new();
        let layout = layout_with_command(&project, "overwatch-definitely-not-installed");

        let outcome = run_deploy(&layout, &no_hook, || Ok(false)).unwrap();

        assert_eq!(outcome, DeployOutcome::Aborted);
    }

    #[test]
    fn test_staged_config_skips_confirmation() {
        let project = TestProject::new();
        project.write("data/config.json", "{}");
        let layout = layout_with_command(&project, "overwatch-definitely-not-installed");
        let asked = Cell::new(false);

        let result = run_deploy(&layout, &no_hook, || {
            asked.set(true);
            Ok(true)
        });

        assert!(!asked.get());
        // Reached the firmware step, which cannot start.
        match result.unwrap_err() {
            CliError::FirmwareSpawn { command, source } => {
                assert_eq!(command, "overwatch-definitely-not-installed run");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_spawn_failure_keeps_os_error_as_source() {
        use std::error::Error as _;

        let project = TestProject::new();
        project.write("data/config.json", "{}");
        let layout = layout_with_command(&project, "overwatch-definitely-not-installed");

        let err = run_deploy(&layout, &no_hook, || Ok(true)).unwrap_err();

        assert!(err.to_string().starts_with("Could not start"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_blank_values_show_as_na() {
        colored::control::set_override(false);
        assert_eq!(or_na(""), "N/A");
        assert_eq!(or_na("Home"), "Home");
    }

    #[cfg(unix)]
    #[test]
    fn test_steps_run_in_order_with_hook_before_uploadfs() {
        let project = TestProject::new();
        project.write("data/config.json", "{}");
        project.write("fake-pio.sh", "#!/bin/sh\necho \"$*\" >> steps.log\n");
        {
            use std::os::unix::fs::PermissionsExt;
            let script = project.path("fake-pio.sh");
            let mut perms = std::fs::metadata(&script).unwrap().permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&script, perms).unwrap();
        }
        let script = project.path("fake-pio.sh");
        let layout = layout_with_command(&project, script.to_str().unwrap());
        let root = project.root().to_path_buf();
        let hook = move || -> overwatch_build::Result<()> {
            std::fs::write(root.join("hook.ran"), "").unwrap();
            let log = std::fs::read_to_string(root.join("steps.log")).unwrap();
            assert!(!log.contains("uploadfs"));
            Ok(())
        };

        let outcome = run_deploy(&layout, &hook, || Ok(true)).unwrap();

        assert_eq!(outcome, DeployOutcome::Completed);
        project.assert_file_exists("hook.ran");
        assert_eq!(
            project.read("steps.log"),
            "run\nrun -t upload\nrun -t uploadfs\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_step_aborts_before_hook() {
        let project = TestProject::new();
        project.write("data/config.json", "{}");
        let layout = layout_with_command(&project, "false");
        let ran = Cell::new(false);
        let hook = || -> overwatch_build::Result<()> {
            ran.set(true);
            Ok(())
        };

        let err = run_deploy(&layout, &hook, || Ok(true)).unwrap_err();

        assert!(!ran.get());
        match err {
            CliError::Firmware { step, code, .. } => {
                assert_eq!(step, "Firmware build");
                assert_eq!(code, Some(1));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_hook_failure_aborts_deploy() {
        let project = TestProject::new();
        project.write("data/config.json", "{}");
        let layout = layout_with_command(&project, "true");
        let hook = || -> overwatch_build::Result<()> {
            Err(overwatch_build::Error::BuildFailed {
                step: overwatch_build::BuildStep::Bundle,
                command: "npm run build".into(),
                code: Some(2),
            })
        };

        let err = run_deploy(&layout, &hook, || Ok(true)).unwrap_err();

        assert!(matches!(err, CliError::Build(_)));
    }
}
