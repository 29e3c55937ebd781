//! Error types for host-side operations.

use std::path::PathBuf;
use theknob_core::{GraphError, InvalidMode};
use thiserror::Error;

/// Errors that can occur outside the audio path.
#[derive(Debug, Error)]
pub enum HostError {
    /// The graph rejected the process spec
    #[error("failed to prepare signal graph: {0}")]
    Graph(#[from] GraphError),

    /// A raw mode value was out of range
    #[error(transparent)]
    Mode(#[from] InvalidMode),

    /// A mode name was not recognised
    #[error("unknown mode '{0}' (expected violet, teal or crimson)")]
    UnknownMode(String),

    /// Failed to encode or decode a state blob
    #[error("invalid state blob: {0}")]
    State(#[from] serde_json::Error),

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl HostError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HostError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HostError::WriteFile {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = HostError::from(GraphError::InvalidSampleRate(-1.0));
        assert_eq!(err.to_string(), "failed to prepare signal graph: invalid sample rate -1 Hz");

        let err = HostError::UnknownMode("blue".into());
        assert!(err.to_string().contains("'blue'"));

        let err = HostError::read_file(
            "/nowhere/knob.toml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().starts_with("failed to read file '/nowhere/knob.toml'"));
    }

    #[test]
    fn invalid_mode_is_transparent() {
        let err = HostError::from(InvalidMode(7));
        assert_eq!(err.to_string(), "mode index 7 is not one of 0, 1, 2");
    }
}
