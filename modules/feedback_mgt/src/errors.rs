//! Error catalog for the feedback_mgt module.
//!
//! Every code is stable and versioned; its HTTP status and title never change
//! once published. Use [`ErrorCode::to_response`] to render a code as an
//! `application/problem+json` body.

use modkit_errors::{ErrDef, Problem, ProblemResponse};

macro_rules! error_catalog {
    ($( $variant:ident => ($status:literal, $title:literal, $code:literal) ),+ $(,)?) => {
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ErrorCode {
            $( $variant ),+
        }

        impl ErrorCode {
            /// Every code in the catalog.
            pub const ALL: &'static [ErrorCode] = &[$( ErrorCode::$variant ),+];

            pub const fn def(&self) -> ErrDef {
                match self {
                    $( ErrorCode::$variant => ErrDef {
                        status: $status,
                        title: $title,
                        code: $code,
                        type_url: concat!("https://errors.example.com/", $code),
                    } ),+
                }
            }
        }
    };
}

error_catalog! {
    feedback_mgt_feedback_message_required_v1 =>
        (400, "Feedback Message Required", "feedback_mgt.feedback.message_required.v1"),
    feedback_mgt_feedback_not_found_v1 =>
        (404, "Feedback Not Found", "feedback_mgt.feedback.not_found.v1"),
    feedback_mgt_filter_invalid_query_v1 =>
        (400, "Invalid Filter Query", "feedback_mgt.filter.invalid_query.v1"),
    feedback_mgt_filter_unsupported_attribute_v1 =>
        (400, "Unsupported Filter Attribute", "feedback_mgt.filter.unsupported_attribute.v1"),
    feedback_mgt_filter_unsupported_operation_v1 =>
        (400, "Unsupported Filter Operation", "feedback_mgt.filter.unsupported_operation.v1"),
    feedback_mgt_page_invalid_limit_v1 =>
        (400, "Invalid Limit", "feedback_mgt.page.invalid_limit.v1"),
    feedback_mgt_page_invalid_offset_v1 =>
        (400, "Invalid Offset", "feedback_mgt.page.invalid_offset.v1"),
    feedback_mgt_sort_unsupported_attribute_v1 =>
        (400, "Unsupported Sort Attribute", "feedback_mgt.sort.unsupported_attribute.v1"),
    feedback_mgt_sort_invalid_order_v1 =>
        (400, "Invalid Sort Order", "feedback_mgt.sort.invalid_order.v1"),
    feedback_mgt_request_invalid_query_params_v1 =>
        (400, "Invalid Query Parameters", "feedback_mgt.request.invalid_query_params.v1"),
    feedback_mgt_request_invalid_body_v1 =>
        (400, "Invalid Request Body", "feedback_mgt.request.invalid_body.v1"),
    feedback_mgt_internal_database_v1 =>
        (500, "Internal Database Error", "feedback_mgt.internal.database.v1"),
    feedback_mgt_internal_transaction_rollback_v1 =>
        (500, "Transaction Rollback Failed", "feedback_mgt.internal.transaction_rollback.v1"),
}

impl ErrorCode {
    #[inline]
    pub fn status(&self) -> u16 {
        self.def().status
    }

    pub fn to_problem(&self, detail: impl Into<String>) -> Problem {
        self.def().to_problem(detail)
    }

    pub fn to_response(
        &self,
        detail: impl Into<String>,
        instance: &str,
        trace_id: Option<String>,
    ) -> ProblemResponse {
        self.def().to_response(detail, instance, trace_id)
    }

    /// Look a code up by its dotted form, e.g. `feedback_mgt.feedback.not_found.v1`.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.def().code == code)
    }
}
