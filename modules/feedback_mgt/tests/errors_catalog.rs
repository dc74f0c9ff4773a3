use std::collections::HashSet;

use feedback_mgt::domain::error::DomainError;
use feedback_mgt::errors::ErrorCode;

#[test]
fn error_code_has_correct_status() {
    assert_eq!(ErrorCode::feedback_mgt_feedback_not_found_v1.status(), 404);
    assert_eq!(ErrorCode::feedback_mgt_filter_invalid_query_v1.status(), 400);
    assert_eq!(ErrorCode::feedback_mgt_internal_database_v1.status(), 500);
    assert_eq!(ErrorCode::feedback_mgt_internal_transaction_rollback_v1.status(), 500);
}

#[test]
fn error_code_to_problem_works() {
    let problem = ErrorCode::feedback_mgt_filter_unsupported_attribute_v1
        .to_problem("Filtering not supported for the given attribute phone.");

    assert_eq!(problem.status, 400);
    assert_eq!(problem.title, "Unsupported Filter Attribute");
    assert_eq!(problem.code, "feedback_mgt.filter.unsupported_attribute.v1");
    assert_eq!(
        problem.type_url,
        "https://errors.example.com/feedback_mgt.filter.unsupported_attribute.v1"
    );
}

#[test]
fn codes_are_unique_and_round_trip() {
    let mut seen = HashSet::new();
    for code in ErrorCode::ALL {
        let def = code.def();
        assert!(seen.insert(def.code), "duplicate code {}", def.code);
        assert!(def.code.starts_with("feedback_mgt."));
        assert!(def.code.ends_with(".v1"));
        assert!(def.type_url.ends_with(def.code));
        assert_eq!(ErrorCode::from_code(def.code), Some(*code));
    }
    assert_eq!(ErrorCode::from_code("feedback_mgt.nope.v1"), None);
}

#[test]
fn to_response_attaches_context() {
    let resp = ErrorCode::feedback_mgt_feedback_not_found_v1.to_response(
        "Feedback not found for id 123.",
        "/feedback/123",
        Some("trace-1".to_string()),
    );

    assert_eq!(resp.0.instance, "/feedback/123");
    assert_eq!(resp.0.trace_id.as_deref(), Some("trace-1"));
    assert_eq!(resp.0.status, 404);
}

#[test]
fn every_domain_error_has_a_matching_code() {
    let errors = [
        DomainError::FeedbackMessageRequired,
        DomainError::invalid_filter_syntax("x"),
        DomainError::unsupported_filter_attribute("x"),
        DomainError::unsupported_filter_operation("x"),
        DomainError::InvalidLimit { limit: -1 },
        DomainError::InvalidOffset { offset: -1 },
        DomainError::unsupported_sort_attribute("x"),
        DomainError::invalid_sort_order("x"),
        DomainError::not_found("x"),
        DomainError::database("x"),
        DomainError::transaction_rollback("x"),
    ];
    // request-shape codes are raised by the REST layer, not by the domain
    let request_codes = [
        ErrorCode::feedback_mgt_request_invalid_query_params_v1,
        ErrorCode::feedback_mgt_request_invalid_body_v1,
    ];
    let used: HashSet<_> = errors.iter().map(|e| e.error_code()).collect();
    assert!(request_codes.iter().all(|c| !used.contains(c) && c.status() == 400));
    assert_eq!(used.len() + request_codes.len(), ErrorCode::ALL.len());
    for e in &errors {
        assert_eq!(e.is_client_error(), e.error_code().def().is_client_error(), "{e:?}");
    }
}
