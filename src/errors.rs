//! Error types for HealthBuddy
//!
//! The triage classifier itself never fails; these errors cover the
//! collaborators around it (remote completion API, configuration, tables).

use thiserror::Error;

/// Main error type for the HealthBuddy assistant
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Remote completion API returned an error
    #[error("Completion API error: {0}")]
    ApiError(String),

    /// API key environment variable not set
    #[error("API key not found: set the {var} environment variable")]
    MissingApiKey { var: String },

    /// Completion API answered without any message content
    #[error("Completion API returned an empty response")]
    EmptyResponse,

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Custom triage tables failed validation
    #[error("Invalid triage tables: {0}")]
    InvalidTables(String),

    /// Generic errors with context
    #[error("Assistant error: {0}")]
    Generic(String),
}

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, AssistantError>;

/// Convert anyhow errors to AssistantError
impl From<anyhow::Error> for AssistantError {
    fn from(err: anyhow::Error) -> Self {
        AssistantError::Generic(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_names_variable() {
        let err = AssistantError::MissingApiKey {
            var: "GROQ_API_KEY".to_string(),
        };
        assert!(err.to_string().contains("GROQ_API_KEY"));
    }

    #[test]
    fn test_invalid_tables_display() {
        let err = AssistantError::InvalidTables("empty keyword in Respiratory".to_string());
        assert!(err.to_string().contains("Respiratory"));
    }

    #[test]
    fn test_from_anyhow() {
        let err: AssistantError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, AssistantError::Generic(ref m) if m == "boom"));
    }
}
