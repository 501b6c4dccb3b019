use crate::config::ConfigOverrides;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// cat-shelter: a small catalog of cats served over HTTP
#[derive(Parser, Debug)]
#[command(name = "cat-shelter")]
#[command(version)]
#[command(about = "Serve a searchable catalog of cats")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log verbosity
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Output format for the search command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Where the site's content and records come from
#[derive(Args, Debug, Clone, Default)]
pub struct SiteArgs {
    /// Configuration file (defaults to ./shelter.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding views/, partials/ and static/
    #[arg(long)]
    pub content_root: Option<PathBuf>,

    /// JSON file with the cat records
    #[arg(long)]
    pub data_file: Option<PathBuf>,
}

impl SiteArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            content_root: self.content_root.clone(),
            data_file: self.data_file.clone(),
            ..Default::default()
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        #[command(flatten)]
        site: SiteArgs,

        /// Interface to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,

        /// Answer not-found pages with status 404
        #[arg(long)]
        strict_status: bool,
    },

    /// Search the catalog and print ranked matches
    Search {
        /// Text to look for in names, breeds and descriptions
        query: String,

        #[command(flatten)]
        site: SiteArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the page a GET request for PATH would return
    Render {
        /// Request target, e.g. /search?q=tabby
        path: String,

        #[command(flatten)]
        site: SiteArgs,
    },
}
