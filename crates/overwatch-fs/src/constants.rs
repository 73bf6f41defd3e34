//! Well-known locations inside an Overwatch project.

use std::path::Path;

/// Default project-relative paths used when `overwatch.toml` does not
/// override them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectPath {
    /// Tool configuration file at the project root
    ToolConfig,
    /// Archive of the configuration exactly as the device served it
    Archive,
    /// Nested configuration packaged into the filesystem image
    Staged,
    /// Root of the web interface project
    InterfaceDir,
    /// Interface sources covered by the build fingerprint
    InterfaceSources,
    /// Stored fingerprint of the last successful interface build
    Fingerprint,
    /// Bundle produced by the interface build
    Artifact,
    /// Marker whose presence means interface dependencies are installed
    DependencyCache,
    /// Destination for stray library directories
    LibDir,
}

impl ProjectPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToolConfig => "overwatch.toml",
            Self::Archive => "backup/config.json",
            Self::Staged => "data/config.json",
            Self::InterfaceDir => "interface",
            Self::InterfaceSources => "src",
            Self::Fingerprint => ".build_hash",
            Self::Artifact => "data/index.html.gz",
            Self::DependencyCache => "node_modules",
            Self::LibDir => "lib",
        }
    }
}

impl AsRef<Path> for ProjectPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl std::fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Interface build manifests hashed after the source tree, in this order.
pub const INTERFACE_MANIFESTS: &[&str] = &[
    "package.json",
    "vite.config.ts",
    "tailwind.config.js",
    "index.html",
];

/// Dependency checkouts that PlatformIO tooling tends to drop at the
/// project root.
pub const STRAY_LIBRARIES: &[&str] = &[
    "arduino-esp32",
    "ESP32-DNSServerAsync",
    "ESPAsync_WiFiManager",
    "esp-idf",
    "esp-idf-repo",
    "socket.io",
    "uWebSockets",
    "WebSocket-Node",
    "ws",
];
