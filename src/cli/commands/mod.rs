pub mod render;
pub mod search;
pub mod serve;

use crate::cli::app::SiteArgs;
use crate::config::{ConfigLoader, ConfigOverrides, ServerConfig};
use crate::Result;
use async_trait::async_trait;

/// Common trait for all command handlers
#[async_trait]
pub trait CommandHandler {
    /// Execute the command
    async fn execute(&self) -> Result<()>;

    /// Get command name for logging
    fn name(&self) -> &'static str;
}

/// Resolve the configuration for a command from its site flags
///
/// Content and data paths must exist.
pub fn resolve_config(site: &SiteArgs, overrides: ConfigOverrides) -> Result<ServerConfig> {
    let work_dir = std::env::current_dir()?;
    ConfigLoader::new()
        .with_strict_validation()
        .resolve(site.config.as_deref(), &work_dir, &overrides)
}
