//! Runtime helpers for catalog-driven Problem building.
use http::StatusCode;

pub mod problem;

pub use problem::{Problem, ProblemResponse, APPLICATION_PROBLEM_JSON};

/// Static error definition from a module catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrDef {
    pub status: u16,
    pub title: &'static str,
    pub code: &'static str,
    pub type_url: &'static str,
}

impl ErrDef {
    /// Convert this error definition into a Problem with the given detail
    #[inline]
    pub fn to_problem(&self, detail: impl Into<String>) -> Problem {
        Problem::new(
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            self.title,
            detail.into(),
        )
        .with_code(self.code)
        .with_type(self.type_url)
    }

    /// Build a ready-to-render response bound to a request path and optional trace id
    pub fn to_response(
        &self,
        detail: impl Into<String>,
        instance: &str,
        trace_id: Option<String>,
    ) -> ProblemResponse {
        let mut problem = self.to_problem(detail).with_instance(instance);
        if let Some(id) = trace_id {
            problem = problem.with_trace_id(id);
        }
        ProblemResponse(problem)
    }

    /// 4xx definitions describe caller mistakes; everything else is a server fault
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }
}
