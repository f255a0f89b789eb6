//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::SessionError;

/// Errors emitted while fetching questions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    #[error("question request timed out")]
    Timeout,
    #[error("question request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("malformed question payload: {0}")]
    Malformed(String),
    #[error("no questions available")]
    Empty,
    #[error(transparent)]
    Http(reqwest::Error),
}

impl FetchError {
    /// Transport-level failures where the endpoint was never reached or never
    /// answered: refused connections, DNS, TLS, timeouts, blocked access.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Timeout | FetchError::Http(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::HttpStatus(status)
        } else {
            FetchError::Http(err)
        }
    }
}

/// Errors emitted while submitting a score.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmitError {
    #[error("score submission timed out")]
    Timeout,
    #[error("score submission failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("malformed acknowledgement: {0}")]
    Malformed(String),
    #[error("score submission rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Http(reqwest::Error),
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SubmitError::Timeout
        } else if err.is_decode() {
            SubmitError::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            SubmitError::HttpStatus(status)
        } else {
            SubmitError::Http(err)
        }
    }
}

/// Errors emitted while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {raw:?}")]
    InvalidNumber { var: &'static str, raw: String },
    #[error("{var} must be at least 1")]
    ZeroQuestionCount { var: &'static str },
    #[error("{var} must be greater than zero")]
    ZeroTimeout { var: &'static str },
    #[error("{var} is not an absolute http(s) url: {raw:?}")]
    InvalidEndpoint { var: &'static str, raw: String },
}

/// Caller errors surfaced by `QuizService`.
///
/// Fetch and submit failures never show up here; they are recorded on the
/// session instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
