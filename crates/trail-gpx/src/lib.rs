//! Trail GPX - Command Line Application Library
//!
//! Wires the codec in `trail-gpx-lib` to its surroundings: reading a trail API payload,
//! pulling out the encoded route and its name, and saving the finished GPX file.

pub mod cli;
pub mod output;
pub mod run;
pub mod source;

pub use cli::Settings;
pub use run::{RunSummary, run};

use std::path::PathBuf;
use trail_gpx_lib::CodecError;

/// Error types for the application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Payload error: {0}")]
    Payload(String),

    #[error("Failed to {action} {}: {source}", path.display())]
    File {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
