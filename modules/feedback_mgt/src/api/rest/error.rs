use axum::extract::rejection::{JsonRejection, QueryRejection};
use modkit_errors::ProblemResponse;

use crate::domain::error::DomainError;
use crate::errors::ErrorCode;

/// Correlate with the current tracing span if there is one.
fn current_trace_id() -> Option<String> {
    tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string())
}

/// Map a domain error to an RFC 9457 ProblemResponse bound to `instance`.
///
/// Server errors get a fixed detail; their cause was already logged by the service.
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    let code = e.error_code();
    let detail = if e.is_client_error() {
        e.to_string()
    } else {
        "An internal error occurred while processing the request".to_string()
    };

    code.to_response(detail, instance, current_trace_id())
}

/// A query string that does not deserialize, e.g. `limit=ten`.
pub fn map_query_rejection(rejection: &QueryRejection, instance: &str) -> ProblemResponse {
    ErrorCode::feedback_mgt_request_invalid_query_params_v1.to_response(
        rejection.body_text(),
        instance,
        current_trace_id(),
    )
}

/// A request body that is not the expected JSON document.
pub fn map_json_rejection(rejection: &JsonRejection, instance: &str) -> ProblemResponse {
    ErrorCode::feedback_mgt_request_invalid_body_v1.to_response(
        rejection.body_text(),
        instance,
        current_trace_id(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_keep_their_message() {
        let resp = map_domain_error(&DomainError::not_found("abc"), "/feedback/abc");
        assert_eq!(resp.0.status, 404);
        assert_eq!(resp.0.code, "feedback_mgt.feedback.not_found.v1");
        assert_eq!(resp.0.instance, "/feedback/abc");
        assert!(resp.0.detail.contains("abc"));
    }

    #[test]
    fn server_errors_hide_store_details() {
        let resp = map_domain_error(
            &DomainError::database("no such table: feedback_tags"),
            "/feedback",
        );
        assert_eq!(resp.0.status, 500);
        assert!(!resp.0.detail.contains("feedback_tags"));
    }
}
