use cat_shelter::{
    cli::commands::{
        render::RenderCommand, search::SearchCommand, serve::ServeCommand, CommandHandler,
    },
    cli::{Cli, Commands, LogLevel},
    Result,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so `render` and `search` output stays clean on stdout
fn initialize_tracing(log_level: LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_filter_directive()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.log_level);

    let command: Box<dyn CommandHandler> = match cli.command {
        Commands::Serve {
            site,
            host,
            port,
            strict_status,
        } => Box::new(ServeCommand::new(site, host, port, strict_status)),
        Commands::Search {
            query,
            site,
            format,
        } => Box::new(SearchCommand::new(query, site, format)),
        Commands::Render { path, site } => Box::new(RenderCommand::new(path, site)),
    };

    tracing::debug!("Running {} command", command.name());
    command.execute().await
}
