//! Error types for backend queries

use thiserror::Error;

/// A read-only query against the version-control backend that did not succeed.
///
/// Every variant carries the full command line so the diagnostic printed to
/// the user names exactly which invocation failed.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The process ran and exited with a non-zero status
    #[error("Error while calling: {command}")]
    Failed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// The process could not be started at all
    #[error("Error while calling: {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process succeeded but wrote something that is not UTF-8
    #[error("Error while calling: {command}")]
    Utf8 {
        command: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl QueryError {
    /// The command line of the failed invocation
    pub fn command(&self) -> &str {
        match self {
            QueryError::Failed { command, .. }
            | QueryError::Spawn { command, .. }
            | QueryError::Utf8 { command, .. } => command,
        }
    }
}
