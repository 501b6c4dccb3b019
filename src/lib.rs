pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod server;

pub use error::{Result, ShelterError};
