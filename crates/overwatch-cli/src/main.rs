//! ESP32 Overwatch CLI
//!
//! Backs up the device config, rebuilds the web interface when it changed,
//! and drives firmware deployment.

mod address;
mod cli;
mod commands;
mod error;

use std::error::Error as _;

use clap::Parser;
use colored::Colorize;
use dialoguer::Confirm;
use tracing_subscriber::EnvFilter;

use address::{Argument, EnvVar, Prompt};
use cli::{Cli, Commands};
use commands::build::interface_hook;
use error::Result;
use overwatch_fs::ProjectLayout;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        let message = e.to_string();
        let mut source = e.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                eprintln!("  {} {}", "caused by:".dimmed(), text);
            }
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = match cli.project_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let layout = ProjectLayout::discover(root)?;
    tracing::debug!(root = %layout.root().display(), "project layout resolved");

    execute_command(cli.command, &layout)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // Quietly keep an already-installed subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}

fn execute_command(cmd: Commands, layout: &ProjectLayout) -> Result<()> {
    match cmd {
        Commands::Backup {
            address,
            no_stage,
            timeout,
        } => cmd_backup(layout, address, !no_stage, timeout),
        Commands::BuildInterface { force } => {
            commands::run_build_interface(layout, force).map(|_| ())
        }
        Commands::Deploy { yes } => cmd_deploy(layout, yes),
        Commands::TidyLibs => commands::run_tidy_libs(layout).map(|_| ()),
    }
}

fn cmd_backup(
    layout: &ProjectLayout,
    address: Option<String>,
    stage: bool,
    timeout: Option<u64>,
) -> Result<()> {
    let address = address::resolve(&[
        &Argument(address),
        &EnvVar(layout.config.device.address_env.clone()),
        &Prompt,
    ])?;
    commands::run_backup(layout, &address, stage, timeout).map(|_| ())
}

fn cmd_deploy(layout: &ProjectLayout, yes: bool) -> Result<()> {
    let hook = interface_hook(layout, false);
    commands::run_deploy(layout, &hook, || {
        if yes {
            return Ok(true);
        }
        Ok(Confirm::new()
            .with_prompt("Deploy without a staged config?")
            .default(false)
            .interact()?)
    })
    .map(|_| ())
}
