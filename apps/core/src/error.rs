use std::io;
use thiserror::Error;

use crate::llm::CollaboratorError;

/// Application-wide error type, consolidating all possible errors into a single enum.
///
/// None of these ever reach an HTTP caller: the query path degrades every
/// failure into a textual answer. They surface during startup (config, data,
/// rule compilation) and inside the service logs.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents standard input/output errors (data file, socket bind).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents malformed JSON in the organization record or a collaborator reply.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Represents configuration-related errors (bad env values, invalid tables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents data validation errors.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Represents a failure of the generative collaborator.
    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Operation timed out: {}", err))
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Config(format!("Invalid intent pattern: {}", err))
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(format!("URL parse error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Collaborator(CollaboratorError::from(err))
    }
}
