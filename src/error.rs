use thiserror::Error;

/// Main error type for the agent and deck demos
#[derive(Error, Debug)]
pub enum DemoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Step {step} is incomplete: {message}")]
    StepValidation { step: u8, message: String },

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Presentation generation failed: {0}")]
    Generation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DemoError>;

impl DemoError {
    /// Check if retrying the same operation could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, DemoError::Io(_) | DemoError::ToolExecution(_))
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            DemoError::Config(_) => "CONFIG_ERROR",
            DemoError::Serialization(_) => "SERIALIZATION_ERROR",
            DemoError::Validation(_) => "VALIDATION_ERROR",
            DemoError::ToolExecution(_) => "TOOL_EXECUTION_ERROR",
            DemoError::ToolNotFound(_) => "TOOL_NOT_FOUND",
            DemoError::StepValidation { .. } => "STEP_VALIDATION_ERROR",
            DemoError::InvalidTemplate(_) => "INVALID_TEMPLATE",
            DemoError::Generation(_) => "GENERATION_ERROR",
            DemoError::Io(_) => "IO_ERROR",
            DemoError::Archive(_) => "ARCHIVE_ERROR",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "retryable": self.is_retryable()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_validation_message() {
        let err = DemoError::StepValidation {
            step: 2,
            message: "Please enter your API key to proceed.".to_string(),
        };
        assert_eq!(err.error_code(), "STEP_VALIDATION_ERROR");
        assert!(err.to_string().starts_with("Step 2 is incomplete"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_payload_shape() {
        let payload = DemoError::ToolNotFound("teleporter".to_string()).to_error_payload();
        assert_eq!(payload["error"]["code"], "TOOL_NOT_FOUND");
        assert_eq!(payload["error"]["retryable"], false);
        assert!(payload["error"]["message"]
            .as_str()
            .unwrap()
            .contains("teleporter"));
    }
}
