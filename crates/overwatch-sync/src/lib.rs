//! Device configuration backup for the Overwatch tooling
//!
//! [`sync`] pulls the configuration a running device currently holds,
//! archives it verbatim and, unless told not to, stages the nested form that
//! the firmware pipeline packages into the filesystem image. A device flashed
//! with a staged config boots with its previous settings instead of entering
//! first-run setup.

pub mod client;
pub mod error;
pub mod model;

use std::path::{Path, PathBuf};
use std::time::Duration;

use overwatch_fs::{ProjectLayout, io};

pub use client::{DEFAULT_TIMEOUT, DeviceClient, config_url, fetch};
pub use error::{Error, Result};
pub use model::{FlatConfig, MqttSettings, NestedConfig, StaticHost, Subnet, WifiSettings, reshape};

/// Write the device document as received, pretty-printed.
///
/// A parsed config is written from its original document; one built in code
/// is serialized from its fields.
pub fn archive(config: &FlatConfig, path: &Path) -> Result<()> {
    match config.document() {
        Some(document) => io::write_json_pretty(path, document)?,
        None => io::write_json_pretty(path, config)?,
    }
    tracing::info!(path = %path.display(), "archived device config");
    Ok(())
}

/// Write the nested document where the deployment pipeline picks it up.
pub fn stage(nested: &NestedConfig, path: &Path) -> Result<()> {
    io::write_json_pretty(path, nested)?;
    tracing::info!(path = %path.display(), "staged config for deployment");
    Ok(())
}

/// Read back a previously staged document, if there is one.
pub fn load_staged(path: &Path) -> Result<Option<NestedConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    Ok(Some(io::read_json(path)?))
}

/// Where [`sync`] writes and how long it waits.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub archive_path: PathBuf,
    /// `None` suppresses staging
    pub staged_path: Option<PathBuf>,
    pub timeout: Duration,
}

impl SyncOptions {
    pub fn from_layout(layout: &ProjectLayout, stage: bool) -> Self {
        Self {
            archive_path: layout.archive_path(),
            staged_path: stage.then(|| layout.staged_path()),
            timeout: Duration::from_secs(layout.config.device.timeout_secs),
        }
    }
}

/// Summary of a completed sync, for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub url: String,
    pub archive_path: PathBuf,
    pub staged_path: Option<PathBuf>,
    pub wifi_ssid: Option<String>,
    pub mqtt_host: Option<String>,
    pub subnet_count: usize,
    pub static_host_count: usize,
}

/// Fetch, archive, then stage.
///
/// Nothing is written unless the fetch succeeds.
pub fn sync(address: &str, options: &SyncOptions) -> Result<SyncReport> {
    let client = DeviceClient::new(options.timeout)?;
    let flat = client.fetch(address)?;

    archive(&flat, &options.archive_path)?;

    if let Some(staged_path) = &options.staged_path {
        stage(&reshape(&flat), staged_path)?;
    } else {
        tracing::debug!("staging suppressed");
    }

    Ok(SyncReport {
        url: config_url(address),
        archive_path: options.archive_path.clone(),
        staged_path: options.staged_path.clone(),
        subnet_count: flat.subnet_count(),
        static_host_count: flat.static_host_count(),
        wifi_ssid: flat.wifi_ssid,
        mqtt_host: flat.mqtt_host,
    })
}
