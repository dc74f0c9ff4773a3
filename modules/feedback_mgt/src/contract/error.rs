use thiserror::Error;

use crate::domain::error::DomainError;
use crate::errors::ErrorCode;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedbackMgtError {
    #[error("Feedback not found: {id}")]
    NotFound { id: String },

    /// `code` is the stable catalog code, e.g. `feedback_mgt.filter.invalid_query.v1`.
    #[error("Validation error: {message}")]
    Validation { code: &'static str, message: String },

    #[error("Internal error")]
    Internal,
}

impl FeedbackMgtError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn validation(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Validation {
            code: code.def().code,
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<DomainError> for FeedbackMgtError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::ResourceNotFound { id } => Self::not_found(id),
            DomainError::Database { .. } | DomainError::TransactionRollback { .. } => {
                Self::internal()
            }
            client => Self::validation(client.error_code(), client.to_string()),
        }
    }
}
