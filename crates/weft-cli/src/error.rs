//! Error types for the Weft CLI.

use std::io;

use thiserror::Error;

use weft_compiler::lower::LowerError;

use crate::config::ConfigError;

/// Everything that can stop a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid node tree in `{path}`: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The input deserialized to a null node.
    #[error("`{0}` contains no compilation unit")]
    EmptyInput(String),

    #[error("{0}")]
    Lower(#[from] LowerError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
