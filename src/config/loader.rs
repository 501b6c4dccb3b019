use super::types::{ConfigOverrides, ServerConfig, DEFAULT_CONFIG_FILE};
use crate::{Result, ShelterError};
use std::path::Path;

/// Loads and validates the server configuration
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Require content and data paths to exist
    strict: bool,
}

impl ConfigLoader {
    /// Create a loader that only checks the shape of the config
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Also verify that the content root and data file exist
    pub fn with_strict_validation(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Load a config file; relative paths inside it are anchored at its directory
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<ServerConfig> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|e| {
            ShelterError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config = if contents.trim().is_empty() {
            ServerConfig::default()
        } else {
            serde_yaml_ng::from_str::<ServerConfig>(&contents).map_err(|e| {
                ShelterError::Config(format!(
                    "Failed to parse config file {}: {}",
                    path.display(),
                    e
                ))
            })?
        };

        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve the effective configuration
    ///
    /// An explicit path must exist. Without one, `shelter.yaml` in `work_dir`
    /// is used when present, otherwise the built-in defaults. Overrides are
    /// applied last and the result is validated.
    pub fn resolve(
        &self,
        explicit: Option<&Path>,
        work_dir: &Path,
        overrides: &ConfigOverrides,
    ) -> Result<ServerConfig> {
        let mut config = match explicit {
            Some(path) => self.load_file(path)?,
            None => {
                let discovered = work_dir.join(DEFAULT_CONFIG_FILE);
                if discovered.is_file() {
                    self.load_file(discovered)?
                } else {
                    let mut config = ServerConfig::default();
                    config.resolve_relative_to(work_dir);
                    config
                }
            }
        };

        config.apply(overrides);
        self.validate(&config)?;
        Ok(config)
    }

    /// Validate a configuration
    pub fn validate(&self, config: &ServerConfig) -> Result<()> {
        if config.host.trim().is_empty() {
            return Err(ShelterError::Config("Host must not be empty".to_string()));
        }

        if config.read_timeout_secs == 0 {
            return Err(ShelterError::Config(
                "read_timeout_secs must be at least 1".to_string(),
            ));
        }

        if self.strict {
            if !config.content_root.is_dir() {
                return Err(ShelterError::Config(format!(
                    "Content root {} is not a directory",
                    config.content_root.display()
                )));
            }

            if !config.data_file.is_file() {
                return Err(ShelterError::Config(format!(
                    "Data file {} does not exist",
                    config.data_file.display()
                )));
            }
        }

        Ok(())
    }
}
