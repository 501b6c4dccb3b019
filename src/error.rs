use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Template error: {name}: {source}")]
    Template {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP protocol error: {0}")]
    Protocol(String),
}

pub type Result<T> = std::result::Result<T, ShelterError>;
