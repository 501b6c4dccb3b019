use super::{resolve_config, CommandHandler};
use crate::cli::app::SiteArgs;
use crate::server::{App, Server};
use crate::Result;
use async_trait::async_trait;

/// Handler for the `serve` command
pub struct ServeCommand {
    pub site: SiteArgs,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub strict_status: bool,
}

#[async_trait]
impl CommandHandler for ServeCommand {
    async fn execute(&self) -> Result<()> {
        let mut overrides = self.site.overrides();
        overrides.host = self.host.clone();
        overrides.port = self.port;
        overrides.strict_status = self.strict_status;

        let config = resolve_config(&self.site, overrides)?;
        tracing::debug!(?config, "Resolved configuration");

        let app = App::from_config(&config)?;
        let server = Server::bind(&config.bind_address(), app)
            .await?
            .with_read_timeout(config.read_timeout());
        server.run().await
    }

    fn name(&self) -> &'static str {
        "serve"
    }
}

impl ServeCommand {
    /// Create new serve command
    pub fn new(site: SiteArgs, host: Option<String>, port: Option<u16>, strict_status: bool) -> Self {
        Self {
            site,
            host,
            port,
            strict_status,
        }
    }
}
