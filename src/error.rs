//! Domain-specific error types for adapt-browserslist

use serde_json::json;
use thiserror::Error;

/// Main error type for the browserslist updater module
#[derive(Error, Debug)]
pub enum UpdaterError {
    #[error("Browserslist database update failed: {message}")]
    DatabaseUpdateFailed { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Module registry error: {message}")]
    Registry { message: String },
}

impl UpdaterError {
    /// Structured context carried by the error, for hosts that surface
    /// failures as data instead of display strings.
    pub fn data(&self) -> serde_json::Value {
        match self {
            UpdaterError::DatabaseUpdateFailed { message }
            | UpdaterError::Config { message }
            | UpdaterError::Registry { message } => json!({ "error": message }),
        }
    }
}

/// Result type alias for updater operations
pub type Result<T> = std::result::Result<T, UpdaterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_failure_carries_message_as_data() {
        let err = UpdaterError::DatabaseUpdateFailed {
            message: "npx exit 1".to_string(),
        };
        assert_eq!(err.data()["error"], "npx exit 1");
        assert!(err.to_string().contains("update failed"));
    }
}
