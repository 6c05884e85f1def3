use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComparisonError {
    #[error("Decode error{}: {message}", at_field(.field))]
    DecodeError {
        field: Option<String>,
        value: Option<String>,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required field: {field}")]
    MissingFieldError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidFieldValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Model comparison service error: {message}")]
    ServiceError { message: String },
}

fn at_field(field: &Option<String>) -> String {
    field
        .as_ref()
        .map(|f| format!(" at '{}'", f))
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ComparisonError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::DecodeError {
            field: None,
            value: None,
            message: message.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ServiceError { .. } => ErrorSeverity::Medium,
            Self::DecodeError { .. }
            | Self::SerializationError(_)
            | Self::MissingFieldError { .. }
            | Self::InvalidFieldValueError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::DecodeError { field: Some(field), .. } => {
                format!("The input could not be read: field '{}' has the wrong shape", field)
            }
            Self::DecodeError { .. } => "The input is not a valid JSON object".to_string(),
            Self::MissingFieldError { field } => format!("Required field '{}' is missing", field),
            Self::InvalidFieldValueError { field, reason, .. } => {
                format!("Field '{}' is invalid: {}", field, reason)
            }
            Self::ServiceError { message } => format!("The comparison service failed: {}", message),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::DecodeError { .. } | Self::SerializationError(_) => {
                "Check that the input is a JSON object and that 'models' is an array of strings"
            }
            Self::MissingFieldError { .. } | Self::InvalidFieldValueError { .. } => {
                "Fix the reported field, or relax the rules in the [validation] config table"
            }
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                "Check the TOML configuration file"
            }
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::ServiceError { .. } => "Retry the request or check the service logs",
        }
    }
}

pub type Result<T> = std::result::Result<T, ComparisonError>;
