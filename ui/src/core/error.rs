//! Error types for the upload/analyze client.

use thiserror::Error;

/// Result type alias using the client's error.
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Everything that can go wrong between a user action and its rendered outcome.
///
/// The controller only distinguishes [`AnalyzerError::Rejected`] (the server
/// answered `success: false`) from the rest, and only for the message text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzerError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("rejected by server: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("export failed: {0}")]
    Export(String),
}

impl AnalyzerError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::Malformed(detail.into())
    }

    pub fn export(detail: impl Into<String>) -> Self {
        Self::Export(detail.into())
    }

    /// Server-provided message worth showing verbatim, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message } => message.as_deref().filter(|m| !m.trim().is_empty()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AnalyzerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AnalyzerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

impl From<toml::de::Error> for AnalyzerError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
