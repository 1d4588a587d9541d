//! Unified error types for the sales insights service.
//!
//! Error codes:
//! - DATA_001: Dataset could not be loaded
//! - VALID_001-002: Request parameter errors
//! - LOOKUP_001: Requested entity does not exist
//! - INTERNAL_001: Anything else

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// DATA_001: Dataset missing, malformed, or lacking columns
    DataLoad,
    /// VALID_001: Parameter missing or not parseable
    InvalidParameter,
    /// VALID_002: Parameter parsed but outside the allowed values
    OutOfRange,
    /// LOOKUP_001: Entity not found
    NotFound,
    /// INTERNAL_001: Unhandled failure
    Internal,
}

impl ErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DataLoad => "DATA_001",
            Self::InvalidParameter => "VALID_001",
            Self::OutOfRange => "VALID_002",
            Self::NotFound => "LOOKUP_001",
            Self::Internal => "INTERNAL_001",
        }
    }

    /// Get the HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidParameter | Self::OutOfRange => 422,
            Self::NotFound => 404,
            Self::DataLoad | Self::Internal => 500,
        }
    }
}

/// Unified error type for the sales insights service.
#[derive(Debug, Error)]
pub enum Error {
    #[error("data load error: {0}")]
    DataLoad(String),

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {0}")]
    NotFound(String),

    /// Parameter missing or not parseable.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    /// Parameter parsed but not allowed.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn data_load(msg: impl Into<String>) -> Self {
        Self::DataLoad(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_parameter(name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: msg.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Classify this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DataLoad(_) | Self::MissingColumns(_) | Self::Csv(_) | Self::Io(_) => {
                ErrorCode::DataLoad
            }
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            Self::Validation(_) => ErrorCode::OutOfRange,
            Self::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        self.code().http_status()
    }

    /// Get the error code string.
    pub fn error_code(&self) -> &'static str {
        self.code().code()
    }

    /// Whether this error came from loading the dataset.
    pub fn is_data_load(&self) -> bool {
        matches!(self.code(), ErrorCode::DataLoad)
    }
}
