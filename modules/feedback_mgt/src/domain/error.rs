use thiserror::Error;

use crate::errors::ErrorCode;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Feedback message is required.")]
    FeedbackMessageRequired,

    #[error("Invalid filter query '{filter}'. Expected '<attribute> <operator> <value>'.")]
    InvalidFilterSyntax { filter: String },

    #[error("Filtering not supported for the given attribute {attribute}.")]
    UnsupportedFilterAttribute { attribute: String },

    #[error("Filter operation {operation} is not supported.")]
    UnsupportedFilterOperation { operation: String },

    #[error("Invalid limit {limit}. Limit must not be negative.")]
    InvalidLimit { limit: i64 },

    #[error("Invalid offset {offset}. Offset must not be negative.")]
    InvalidOffset { offset: i64 },

    #[error("Sorting not supported for the given attribute {attribute}.")]
    UnsupportedSortAttribute { attribute: String },

    #[error("Invalid sort order {order}. Expected asc or desc.")]
    InvalidSortOrder { order: String },

    #[error("Feedback not found for id {id}.")]
    ResourceNotFound { id: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Transaction rollback failed: {message}")]
    TransactionRollback { message: String },
}

impl DomainError {
    pub fn invalid_filter_syntax(filter: impl Into<String>) -> Self {
        Self::InvalidFilterSyntax {
            filter: filter.into(),
        }
    }

    pub fn unsupported_filter_attribute(attribute: impl Into<String>) -> Self {
        Self::UnsupportedFilterAttribute {
            attribute: attribute.into(),
        }
    }

    pub fn unsupported_filter_operation(operation: impl Into<String>) -> Self {
        Self::UnsupportedFilterOperation {
            operation: operation.into(),
        }
    }

    pub fn unsupported_sort_attribute(attribute: impl Into<String>) -> Self {
        Self::UnsupportedSortAttribute {
            attribute: attribute.into(),
        }
    }

    pub fn invalid_sort_order(order: impl Into<String>) -> Self {
        Self::InvalidSortOrder {
            order: order.into(),
        }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::ResourceNotFound { id: id.into() }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn transaction_rollback(message: impl Into<String>) -> Self {
        Self::TransactionRollback {
            message: message.into(),
        }
    }

    /// Caller mistakes, fixable by correcting the request.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            Self::Database { .. } | Self::TransactionRollback { .. }
        )
    }

    /// Catalog entry used when this error crosses the module boundary.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::FeedbackMessageRequired => ErrorCode::feedback_mgt_feedback_message_required_v1,
            Self::InvalidFilterSyntax { .. } => ErrorCode::feedback_mgt_filter_invalid_query_v1,
            Self::UnsupportedFilterAttribute { .. } => {
                ErrorCode::feedback_mgt_filter_unsupported_attribute_v1
            }
            Self::UnsupportedFilterOperation { .. } => {
                ErrorCode::feedback_mgt_filter_unsupported_operation_v1
            }
            Self::InvalidLimit { .. } => ErrorCode::feedback_mgt_page_invalid_limit_v1,
            Self::InvalidOffset { .. } => ErrorCode::feedback_mgt_page_invalid_offset_v1,
            Self::UnsupportedSortAttribute { .. } => {
                ErrorCode::feedback_mgt_sort_unsupported_attribute_v1
            }
            Self::InvalidSortOrder { .. } => ErrorCode::feedback_mgt_sort_invalid_order_v1,
            Self::ResourceNotFound { .. } => ErrorCode::feedback_mgt_feedback_not_found_v1,
            Self::Database { .. } => ErrorCode::feedback_mgt_internal_database_v1,
            Self::TransactionRollback { .. } => {
                ErrorCode::feedback_mgt_internal_transaction_rollback_v1
            }
        }
    }
}
