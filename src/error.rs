use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Rejected input for a validated value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The value was required to be a non-empty string.
    #[error("{field} should be a non-empty string")]
    Empty { field: &'static str },

    /// The new value is identical to the current one.
    #[error("new name is the same as the current name")]
    Unchanged,
}

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from the terminal or fixture files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Malformed folder data.
    #[error("Invalid folder data: {0}")]
    Json(#[from] serde_json::Error),

    /// User input rejected by validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The data source has no listing for the folder.
    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    /// Any other failure reported by the folder data source.
    #[error("Data source error: {0}")]
    Source(String),

    /// Upload collaborator failure.
    #[error("Upload failed: {0}")]
    Upload(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn terminal_error_display() {
        let err = AppError::Terminal("failed to enter raw mode".into());
        assert_eq!(err.to_string(), "Terminal error: failed to enter raw mode");
    }

    #[test]
    fn validation_error_conversion() {
        let err: AppError = ValidationError::Empty { field: "name" }.into();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation failed: name should be a non-empty string"
        );
    }

    #[test]
    fn json_error_conversion() {
        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err: AppError = json_err.into();
        assert!(matches!(err, AppError::Json(_)));
    }

    #[test]
    fn folder_not_found_display() {
        let err = AppError::FolderNotFound("archive".into());
        assert_eq!(err.to_string(), "Folder not found: archive");
    }
}
