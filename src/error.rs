//! Error types for option parsing, configuration and command execution.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort a cgr invocation.
///
/// A child process exiting non-zero is not an error: its exit code is
/// returned to the caller and becomes cgr's own exit code.
#[derive(Debug, Error)]
pub enum CgrError {
    /// A recognized option flag was the last token, with no value after it.
    #[error("Option '--{option}' requires a value")]
    MalformedOption { option: String },

    /// An option value is not valid unicode.
    #[error("Value for option '--{option}' is not valid unicode")]
    InvalidOptionValue { option: String },

    /// The package manager binary could not be started.
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The per-project install directory could not be created.
    #[error("Failed to create install directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output file could not be opened for writing.
    #[error("Failed to open output file '{path}': {source}")]
    OutputFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CgrError {
    /// Process exit code used when this error ends the invocation.
    pub fn exit_code(&self) -> i32 {
        match self {
            CgrError::MalformedOption { .. } | CgrError::InvalidOptionValue { .. } => 2,
            CgrError::Spawn { source, .. } if source.kind() == io::ErrorKind::NotFound => 127,
            CgrError::Spawn { .. } => 126,
            CgrError::CreateDir { .. } | CgrError::OutputFile { .. } | CgrError::Config(_) => 1,
        }
    }
}
