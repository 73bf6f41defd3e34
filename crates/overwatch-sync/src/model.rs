//! Flat and nested configuration documents
//!
//! The device serves a single-level document from `/config`, while its
//! persisted storage expects `wifi` and `mqtt` grouped into sub-records.
//! [`reshape`] converts the former into the latter and never fails: every
//! field has a default.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Broker port used when the device does not report one.
pub const DEFAULT_MQTT_PORT: u16 = 1883;

/// Scan interval used when the device does not report one (five minutes).
pub const DEFAULT_SCAN_INTERVAL_MS: u32 = 300_000;

/// Name resolution is on unless the device says otherwise.
pub const DEFAULT_RESOLVE_NAMES: bool = true;

/// A subnet target, either a bare CIDR or a labelled record.
///
/// Entries keep the shape they arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Subnet {
    Cidr(String),
    Named {
        cidr: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
}

impl Subnet {
    pub fn cidr(&self) -> &str {
        match self {
            Self::Cidr(cidr) => cidr,
            Self::Named { cidr, .. } => cidr,
        }
    }
}

/// A single host probed on every scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticHost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Keys this tooling does not know about, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Configuration as served by the device. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wifi_ssid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wifi_pass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt_host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt_pass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_interval_ms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolve_names: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnets: Option<Vec<Subnet>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_hosts: Option<Vec<StaticHost>>,
    /// Top-level keys this tooling does not know about
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// The document exactly as the device sent it
    #[serde(skip)]
    document: Option<Map<String, Value>>,
}

impl FlatConfig {
    /// Parse and validate a document body.
    ///
    /// Anything that is not a JSON object, or whose known keys have the
    /// wrong type or range, is a [`Error::Format`]. `null` counts as absent.
    pub fn from_json(body: &str) -> Result<Self> {
        Self::from_slice(body.as_bytes())
    }

    /// Parse raw response bytes. Bodies that are not UTF-8 are rejected.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| Error::format(format!("response is not valid JSON: {e}")))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let document = match value {
            Value::Object(document) => document,
            other => {
                return Err(Error::format(format!(
                    "expected a JSON object, found {}",
                    json_kind(&other)
                )));
            }
        };
        let mut config: Self = serde_json::from_value(Value::Object(document.clone()))
            .map_err(|e| Error::format(e.to_string()))?;
        config.document = Some(document);
        Ok(config)
    }

    /// The parsed document, `null` values and unknown keys included.
    ///
    /// `None` for configs built in code rather than parsed.
    pub fn document(&self) -> Option<&Map<String, Value>> {
        self.document.as_ref()
    }

    pub fn subnet_count(&self) -> usize {
        self.subnets.as_ref().map_or(0, Vec::len)
    }

    pub fn static_host_count(&self) -> usize {
        self.static_hosts.as_ref().map_or(0, Vec::len)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiSettings {
    pub ssid: String,
    pub pass: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MqttSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
}

impl Default for MqttSettings {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_MQTT_PORT,
            user: String::new(),
            pass: String::new(),
        }
    }
}

/// Configuration in the shape the device loads from its filesystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NestedConfig {
    pub wifi: WifiSettings,
    pub mqtt: MqttSettings,
    pub scan_interval_ms: u32,
    pub resolve_names: bool,
    pub subnets: Vec<Subnet>,
    pub static_hosts: Vec<StaticHost>,
}

impl Default for NestedConfig {
    fn default() -> Self {
        reshape(&FlatConfig::default())
    }
}

impl From<&FlatConfig> for NestedConfig {
    fn from(flat: &FlatConfig) -> Self {
        reshape(flat)
    }
}

/// Group the flat device document into the nested storage shape.
pub fn reshape(flat: &FlatConfig) -> NestedConfig {
    let text = |field: &Option<String>| field.clone().unwrap_or_default();

    NestedConfig {
        wifi: WifiSettings {
            ssid: text(&flat.wifi_ssid),
            pass: text(&flat.wifi_pass),
        },
        mqtt: MqttSettings {
            host: text(&flat.mqtt_host),
            port: flat.mqtt_port.unwrap_or(DEFAULT_MQTT_PORT),
            user: text(&flat.mqtt_user),
            pass: text(&flat.mqtt_pass),
        },
        scan_interval_ms: flat.scan_interval_ms.unwrap_or(DEFAULT_SCAN_INTERVAL_MS),
        resolve_names: flat.resolve_names.unwrap_or(DEFAULT_RESOLVE_NAMES),
        subnets: flat.subnets.clone().unwrap_or_default(),
        static_hosts: flat.static_hosts.clone().unwrap_or_default(),
    }
}
