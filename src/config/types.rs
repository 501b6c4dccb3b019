use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "shelter.yaml";

/// Server settings, read from YAML and overridable from the command line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to listen on
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding views/, partials/ and static/
    #[serde(default = "default_content_root")]
    pub content_root: PathBuf,

    /// JSON array of cat records
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Answer not-found pages with status 404 instead of 200
    #[serde(default)]
    pub strict_status: bool,

    /// Seconds a client may take to send its request
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_content_root() -> PathBuf {
    PathBuf::from("content")
}

fn default_data_file() -> PathBuf {
    PathBuf::from("content/data.json")
}

fn default_read_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            content_root: default_content_root(),
            data_file: default_data_file(),
            strict_status: false,
            read_timeout_secs: default_read_timeout_secs(),
        }
    }
}

impl ServerConfig {
    /// `host:port` as a string suitable for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    /// Anchor relative paths at `base` (the directory of the config file)
    pub fn resolve_relative_to(&mut self, base: &Path) {
        if self.content_root.is_relative() {
            self.content_root = base.join(&self.content_root);
        }
        if self.data_file.is_relative() {
            self.data_file = base.join(&self.data_file);
        }
    }

    /// Replace every field the overrides set
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(host) = &overrides.host {
            self.host = host.clone();
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(root) = &overrides.content_root {
            self.content_root = root.clone();
        }
        if let Some(data) = &overrides.data_file {
            self.data_file = data.clone();
        }
        if overrides.strict_status {
            self.strict_status = true;
        }
    }
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub content_root: Option<PathBuf>,
    pub data_file: Option<PathBuf>,
    pub strict_status: bool,
}
