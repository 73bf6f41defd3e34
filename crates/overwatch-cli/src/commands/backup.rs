//! Backup command implementation

use std::time::Duration;

use colored::Colorize;
use overwatch_fs::ProjectLayout;
use overwatch_sync::{SyncOptions, SyncReport, config_url, sync};

use super::deploy::or_na;
use crate::error::Result;

/// Download the device config, archive it and optionally stage it.
pub fn run_backup(
    layout: &ProjectLayout,
    address: &str,
    stage: bool,
    timeout: Option<u64>,
) -> Result<SyncReport> {
    let mut options = SyncOptions::from_layout(layout, stage);
    if let Some(secs) = timeout {
        options.timeout = Duration::from_secs(secs);
    }

    println!("Downloading config from {}...", config_url(address).cyan());
    let report = sync(address, &options)?;
    print_report(&report);
    Ok(report)
}

fn print_report(report: &SyncReport) {
    println!(
        "{} Config backed up to {}",
        "✓".green(),
        report.archive_path.display()
    );
    println!(
        "  {}: {}",
        "WiFi SSID".dimmed(),
        or_na(report.wifi_ssid.as_deref().unwrap_or_default())
    );
    println!(
        "  {}: {}",
        "MQTT Host".dimmed(),
        or_na(report.mqtt_host.as_deref().unwrap_or_default())
    );
    println!("  {}: {}", "Subnets".dimmed(), report.subnet_count);
    println!("  {}: {}", "Static hosts".dimmed(), report.static_host_count);

    if let Some(staged) = &report.staged_path {
        println!(
            "{} Converted to nested format and saved to {}",
            "✓".green(),
            staged.display()
        );
        println!("  (ready for filesystem deployment)");
    }
}
