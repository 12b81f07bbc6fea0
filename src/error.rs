// ============================================================================
// Error Types - SXAPI client and import pipeline
// ============================================================================
//
// Remote business errors (a field update rejected by the ERP) are NOT errors
// here: they arrive as data in `ImportResult::error_message`. Everything in
// this enum aborts the call that raised it.
//
// ============================================================================

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SxApiError {
    #[error("Row {row} is missing required key column '{column}'")]
    MissingKey { column: String, row: usize },

    #[error("Cannot validate record: {0}")]
    Validation(String),

    #[error("SXAPI error ({0}): {1}")]
    ApiError(StatusCode, String),

    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("No credentials supplied and no default credentials configured")]
    MissingCredentials,

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SxApiError {
    /// True for failures of the HTTP round trip itself (as opposed to input
    /// or validation problems detected before anything was sent).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SxApiError::ApiError(..) | SxApiError::AuthError(_) | SxApiError::NetworkError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SxApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_message_names_column_and_row() {
        let err = SxApiError::MissingKey { column: "prod".to_string(), row: 3 };
        assert_eq!(err.to_string(), "Row 3 is missing required key column 'prod'");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_api_error_is_transport() {
        let err = SxApiError::ApiError(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert!(err.is_transport());
        assert!(err.to_string().contains("502"));
    }
}
