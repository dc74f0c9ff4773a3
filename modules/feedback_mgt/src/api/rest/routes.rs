use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use utoipa::OpenApi;

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// OpenAPI document for the feedback REST surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::create_feedback,
        handlers::list_feedback,
        handlers::count_feedback,
        handlers::get_feedback,
        handlers::feedback_exists,
        handlers::update_feedback,
        handlers::delete_feedback,
    ),
    tags((name = "feedback", description = "Feedback submission and management"))
)]
pub struct FeedbackApiDoc;

/// Register the feedback routes on `router`; the service is injected via `Extension`.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route(
            "/feedback",
            get(handlers::list_feedback).post(handlers::create_feedback),
        )
        .route("/feedback/count", get(handlers::count_feedback))
        .route(
            "/feedback/{id}",
            get(handlers::get_feedback)
                .head(handlers::feedback_exists)
                .put(handlers::update_feedback)
                .delete(handlers::delete_feedback),
        )
        .layer(Extension(service))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_operation() {
        let doc = FeedbackApiDoc::openapi();
        let v = serde_json::to_value(&doc).unwrap();

        for pointer in [
            "/paths/~1feedback/get",
            "/paths/~1feedback/post",
            "/paths/~1feedback~1count/get",
            "/paths/~1feedback~1{id}/get",
            "/paths/~1feedback~1{id}/head",
            "/paths/~1feedback~1{id}/put",
            "/paths/~1feedback~1{id}/delete",
        ] {
            assert!(v.pointer(pointer).is_some(), "missing {pointer}");
        }
        assert!(v.pointer("/components/schemas/FeedbackDto").is_some());
        assert!(v.pointer("/components/schemas/Problem").is_some());
    }
}
