use super::{resolve_config, CommandHandler};
use crate::cli::app::SiteArgs;
use crate::server::{App, Request};
use crate::Result;
use async_trait::async_trait;
use std::io::Write;

/// Handler for the `render` command
pub struct RenderCommand {
    pub path: String,
    pub site: SiteArgs,
}

#[async_trait]
impl CommandHandler for RenderCommand {
    async fn execute(&self) -> Result<()> {
        let config = resolve_config(&self.site, self.site.overrides())?;
        let app = App::from_config(&config)?;

        let response = app.handle(&Request::get(&self.path)).await?;
        tracing::debug!(status = response.status, bytes = response.body.len(), "Rendered {}", self.path);

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&response.body)?;
        stdout.flush()?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "render"
    }
}

impl RenderCommand {
    /// Create new render command
    pub fn new(path: String, site: SiteArgs) -> Self {
        Self { path, site }
    }
}
