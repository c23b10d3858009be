//! Domain-specific error types for mandala-mind

use thiserror::Error;

/// Main error type for generation, parsing and export
#[derive(Error, Debug)]
pub enum MandalaError {
    #[error("Missing credential: {message}")]
    MissingCredential { message: String },

    #[error("Empty response: {message}")]
    EmptyResponse { message: String },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("Export failed: {message}")]
    ExportFailure { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("HTTP error: {message}")]
    Http { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl MandalaError {
    /// Short label suitable for a transient user-facing notification
    pub fn user_message(&self) -> String {
        match self {
            MandalaError::MissingCredential { .. } => {
                "API key is not configured. Set GEMINI_API_KEY and try again.".to_string()
            }
            MandalaError::EmptyResponse { .. } => {
                "The model returned no content. Please try again.".to_string()
            }
            MandalaError::MalformedResponse { .. } => {
                "The model returned an unreadable result. Please try again.".to_string()
            }
            MandalaError::ExportFailure { message } => format!("Export failed: {message}"),
            other => other.to_string(),
        }
    }

    /// Whether a checklist request hitting this error should degrade to an empty list
    pub fn degrades_to_empty(&self) -> bool {
        matches!(
            self,
            MandalaError::EmptyResponse { .. } | MandalaError::MalformedResponse { .. }
        )
    }
}

impl From<serde_json::Error> for MandalaError {
    fn from(err: serde_json::Error) -> Self {
        MandalaError::MalformedResponse {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for MandalaError {
    fn from(err: reqwest::Error) -> Self {
        MandalaError::Http {
            message: format!("HTTP request failed: {}", err),
        }
    }
}

impl From<std::io::Error> for MandalaError {
    fn from(err: std::io::Error) -> Self {
        MandalaError::Io {
            message: err.to_string(),
        }
    }
}

impl From<zip::result::ZipError> for MandalaError {
    fn from(err: zip::result::ZipError) -> Self {
        MandalaError::ExportFailure {
            message: format!("Document packaging error: {}", err),
        }
    }
}

impl From<toml::de::Error> for MandalaError {
    fn from(err: toml::de::Error) -> Self {
        MandalaError::Config {
            message: err.to_string(),
        }
    }
}

/// Result type alias for mandala-mind operations
pub type Result<T> = std::result::Result<T, MandalaError>;
