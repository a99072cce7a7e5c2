//! Error types for scaffold runs
//!
//! Every variant is fatal to the run. Nothing here is retried; the user is
//! expected to fix the reported cause and invoke the tool again.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the core library
pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The prompt adapter returned a value outside the declared candidates.
    /// This is a tooling bug, not a user error.
    #[error("Prompt '{key}' returned '{value}', expected one of: {}", .candidates.join(", "))]
    InvalidChoice {
        key: String,
        value: String,
        candidates: Vec<String>,
    },

    /// The planner consulted a key that no rule ever wrote
    #[error("Answer '{key}' was never recorded")]
    UnknownAnswerKey { key: String },

    #[error("Answer '{key}' is not a {expected}")]
    AnswerType { key: String, expected: &'static str },

    #[error("Unknown profile '{name}'. Available profiles: {}", .available.join(", "))]
    UnknownProfile {
        name: String,
        available: Vec<&'static str>,
    },

    /// The prompt adapter was cancelled or failed
    #[error("Prompt aborted: {0}")]
    Prompt(#[source] io::Error),

    #[error("Template '{name}': {message}")]
    Template { name: String, message: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid answers file {}: {message}", .path.display())]
    AnswersFile { path: PathBuf, message: String },

    #[error("`{command}` failed: {message}")]
    Install { command: String, message: String },
}

impl ScaffoldError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn template(name: &str, err: impl std::fmt::Display) -> Self {
        Self::Template {
            name: name.to_string(),
            message: err.to_string(),
        }
    }
}
