//! Content loading errors.

use game_core::{ErrorSeverity, GameError};

/// Common result type for loaders.
pub type LoadResult<T> = Result<T, LoadError>;

/// Failure to produce a content record. Never defaulted away: callers decide
/// whether to abort.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The store could not return the record.
    #[error("Failed to load {path}: {reason}")]
    ContentNotFound { path: String, reason: String },

    /// The record is not valid JSON or does not match its schema.
    #[error("Malformed content at {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Parameter templating failed.
    #[error("Invalid parameters for {path}: {reason}")]
    Template { path: String, reason: String },

    /// Session configuration could not be parsed.
    #[error("Invalid config at {path}: {reason}")]
    Config { path: String, reason: String },
}

impl LoadError {
    pub(crate) fn malformed(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Malformed {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn template(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Template {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Store path of the record that failed.
    pub fn path(&self) -> &str {
        match self {
            Self::ContentNotFound { path, .. }
            | Self::Malformed { path, .. }
            | Self::Template { path, .. }
            | Self::Config { path, .. } => path,
        }
    }
}

impl GameError for LoadError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ContentNotFound { .. } => ErrorSeverity::Fatal,
            Self::Malformed { .. } | Self::Template { .. } | Self::Config { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ContentNotFound { .. } => "CONTENT_NOT_FOUND",
            Self::Malformed { .. } => "CONTENT_MALFORMED",
            Self::Template { .. } => "CONTENT_TEMPLATE",
            Self::Config { .. } => "CONTENT_CONFIG",
        }
    }
}
