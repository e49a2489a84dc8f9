use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("column configuration error: {0}")]
    Configuration(String),
    #[error("row fetch failed: {0}")]
    Fetch(#[source] anyhow::Error),
}

impl TableError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { .. } => ErrorCode::Validation,
            Self::Configuration(_) => ErrorCode::Configuration,
            Self::Fetch(_) => ErrorCode::Fetch,
        }
    }
}

impl From<&TableError> for ApiError {
    fn from(value: &TableError) -> Self {
        ApiError::new(value.code(), value.to_string())
    }
}

impl From<TableError> for ApiError {
    fn from(value: TableError) -> Self {
        Self::from(&value)
    }
}

pub type Result<T, E = TableError> = std::result::Result<T, E>;
