//! Error types for failure handling across the console.
//!
//! A single enum covers every subsystem so that the workflow engine can catch
//! and display any collaborator failure at one boundary. `Interrupted` is the
//! exception: it marks a forced user interrupt (Ctrl-C or end-of-input) and is
//! treated as cancellation, never as an error, wherever it surfaces.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpsError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("I/O error: {0}")]
    IoError(String),
    #[error("Website error: {0}")]
    WebsiteError(String),
    #[error("SSL error: {0}")]
    SslError(String),
    #[error("Editor error: {0}")]
    EditorError(String),
    #[error("Webserver error: {0}")]
    WebserverError(String),
    #[error("PHP error: {0}")]
    PhpError(String),
    #[error("Command '{command}' failed: {message}")]
    CommandError { command: String, message: String },
    #[error("Operation interrupted by user")]
    Interrupted,
}

impl From<io::Error> for OpsError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::Interrupted {
            OpsError::Interrupted
        } else {
            OpsError::IoError(err.to_string())
        }
    }
}

impl From<dialoguer::Error> for OpsError {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(io_err) => io_err.into(),
        }
    }
}

impl OpsError {
    /// Whether this failure is a user-initiated abort rather than a real error.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, OpsError::Interrupted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupted_io_error_maps_to_interrupted() {
        let err: OpsError = io::Error::new(io::ErrorKind::Interrupted, "read interrupted").into();
        assert!(err.is_interrupted());
    }

    #[test]
    fn test_other_io_error_maps_to_io_variant() {
        let err: OpsError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(!err.is_interrupted());
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_command_error_display_includes_command() {
        let err = OpsError::CommandError {
            command: "docker exec".to_string(),
            message: "exit status 1".to_string(),
        };
        assert!(err.to_string().contains("docker exec"));
    }
}
