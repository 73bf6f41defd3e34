//! HTTP client for the device's `/config` endpoint

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::error::{Error, Result};
use crate::model::FlatConfig;

/// Upper bound on how long a fetch may block.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking client that retrieves a device's current configuration.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    http: Client,
    timeout: Duration,
}

impl DeviceClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        // Devices are on the local network; ignore system proxies
        let http = Client::builder()
            .no_proxy()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(Error::Client)?;
        Ok(Self { http, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Issue one GET to `http://{address}/config` and validate the body.
    ///
    /// No retries: the first failure is returned.
    pub fn fetch(&self, address: &str) -> Result<FlatConfig> {
        let url = config_url(address);
        tracing::info!(%url, "fetching device config");

        let response = self.http.get(&url).send().map_err(|e| Error::Connect {
            url: url.clone(),
            reason: self.describe(&e),
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Http {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|e| Error::Connect {
            url: url.clone(),
            reason: self.describe(&e),
        })?;
        tracing::debug!(bytes = body.len(), "received config body");

        FlatConfig::from_slice(&body)
    }

    /// Innermost cause of a transport error, which is what an operator can
    /// act on ("connection refused", "no route to host").
    fn describe(&self, error: &reqwest::Error) -> String {
        if error.is_timeout() {
            return format!("timed out after {}s", self.timeout.as_secs_f32());
        }
        let mut cause: &dyn std::error::Error = error;
        while let Some(source) = cause.source() {
            cause = source;
        }
        cause.to_string()
    }
}

/// Fetch with the default timeout.
pub fn fetch(address: &str) -> Result<FlatConfig> {
    DeviceClient::new(DEFAULT_TIMEOUT)?.fetch(address)
}

/// Build the config endpoint URL for a device address.
///
/// Bare hosts get an `http://` scheme; an explicit scheme is kept.
pub fn config_url(address: &str) -> String {
    let address = address.trim().trim_end_matches('/');
    if address.starts_with("http://") || address.starts_with("https://") {
        format!("{address}/config")
    } else {
        format!("http://{address}/config")
    }
}
