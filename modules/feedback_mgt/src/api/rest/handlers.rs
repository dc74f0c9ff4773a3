use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use modkit_errors::{Problem, ProblemResponse};
use tracing::{debug, info};

use crate::api::rest::dto::{
    CountFeedbackQuery, CreateFeedbackReq, FeedbackCountDto, FeedbackDto, FeedbackListDto,
    ListFeedbackQuery, UpdateFeedbackReq,
};
use crate::api::rest::error::{map_domain_error, map_json_rejection, map_query_rejection};
use crate::domain::error::DomainError;
use crate::domain::service::Service;

fn log_failure(op: &str, e: &DomainError) {
    // server errors are logged with their cause by the service
    if e.is_client_error() {
        debug!(op, error = %e, "Request rejected");
    }
}

/// Submit a new feedback entry
#[utoipa::path(
    post,
    path = "/feedback",
    tag = "feedback",
    request_body = CreateFeedbackReq,
    responses(
        (status = 201, description = "Created feedback", body = FeedbackDto),
        (status = 400, description = "Bad Request", body = Problem),
        (status = 500, description = "Internal Server Error", body = Problem)
    )
)]
pub async fn create_feedback(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    req_body: Result<Json<CreateFeedbackReq>, JsonRejection>,
) -> Result<(StatusCode, Json<FeedbackDto>), ProblemResponse> {
    info!("Submitting feedback");
    let Json(req_body) = req_body.map_err(|r| map_json_rejection(&r, uri.path()))?;

    match svc.create_feedback(req_body.into()).await {
        Ok(feedback) => Ok((StatusCode::CREATED, Json(FeedbackDto::from(feedback)))),
        Err(e) => {
            log_failure("create_feedback", &e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// List feedback with an optional filter, sorting and pagination
#[utoipa::path(
    get,
    path = "/feedback",
    tag = "feedback",
    params(ListFeedbackQuery),
    responses(
        (status = 200, description = "One page of feedback", body = FeedbackListDto),
        (status = 400, description = "Bad Request", body = Problem),
        (status = 500, description = "Internal Server Error", body = Problem)
    )
)]
pub async fn list_feedback(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    query: Result<Query<ListFeedbackQuery>, QueryRejection>,
) -> Result<Json<FeedbackListDto>, ProblemResponse> {
    let Query(query) = query.map_err(|r| map_query_rejection(&r, uri.path()))?;
    info!("Listing feedback with query: {:?}", query);

    match svc.list_feedback(query.into()).await {
        Ok(items) => Ok(Json(FeedbackListDto {
            items: items.into_iter().map(FeedbackDto::from).collect(),
        })),
        Err(e) => {
            log_failure("list_feedback", &e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Count feedback matching an optional filter
#[utoipa::path(
    get,
    path = "/feedback/count",
    tag = "feedback",
    params(CountFeedbackQuery),
    responses(
        (status = 200, description = "Number of matching entries", body = FeedbackCountDto),
        (status = 400, description = "Bad Request", body = Problem),
        (status = 500, description = "Internal Server Error", body = Problem)
    )
)]
pub async fn count_feedback(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    query: Result<Query<CountFeedbackQuery>, QueryRejection>,
) -> Result<Json<FeedbackCountDto>, ProblemResponse> {
    let Query(query) = query.map_err(|r| map_query_rejection(&r, uri.path()))?;
    match svc.count_feedback(query.filter.as_deref()).await {
        Ok(count) => Ok(Json(FeedbackCountDto { count })),
        Err(e) => {
            log_failure("count_feedback", &e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Get a feedback entry by external id
#[utoipa::path(
    get,
    path = "/feedback/{id}",
    tag = "feedback",
    params(("id" = String, Path, description = "External id of the entry")),
    responses(
        (status = 200, description = "Feedback found", body = FeedbackDto),
        (status = 404, description = "Not Found", body = Problem),
        (status = 500, description = "Internal Server Error", body = Problem)
    )
)]
pub async fn get_feedback(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<Json<FeedbackDto>, ProblemResponse> {
    match svc.get_feedback(&id).await {
        Ok(feedback) => Ok(Json(FeedbackDto::from(feedback))),
        Err(e) => {
            log_failure("get_feedback", &e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Check whether a feedback entry exists
#[utoipa::path(
    head,
    path = "/feedback/{id}",
    tag = "feedback",
    params(("id" = String, Path, description = "External id of the entry")),
    responses(
        (status = 200, description = "Feedback exists"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn feedback_exists(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ProblemResponse> {
    match svc.feedback_exists(&id).await {
        Ok(true) => Ok(StatusCode::OK),
        Ok(false) => Ok(StatusCode::NOT_FOUND),
        Err(e) => Err(map_domain_error(&e, uri.path())),
    }
}

/// Overwrite a feedback entry, replacing its tags
#[utoipa::path(
    put,
    path = "/feedback/{id}",
    tag = "feedback",
    params(("id" = String, Path, description = "External id of the entry")),
    request_body = UpdateFeedbackReq,
    responses(
        (status = 200, description = "Updated feedback", body = FeedbackDto),
        (status = 400, description = "Bad Request", body = Problem),
        (status = 404, description = "Not Found", body = Problem),
        (status = 500, description = "Internal Server Error", body = Problem)
    )
)]
pub async fn update_feedback(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    req_body: Result<Json<UpdateFeedbackReq>, JsonRejection>,
) -> Result<Json<FeedbackDto>, ProblemResponse> {
    info!("Updating feedback {}", id);
    let Json(req_body) = req_body.map_err(|r| map_json_rejection(&r, uri.path()))?;

    match svc.update_feedback(&id, req_body.into()).await {
        Ok(feedback) => Ok(Json(FeedbackDto::from(feedback))),
        Err(e) => {
            log_failure("update_feedback", &e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Delete a feedback entry and its tags
#[utoipa::path(
    delete,
    path = "/feedback/{id}",
    tag = "feedback",
    params(("id" = String, Path, description = "External id of the entry")),
    responses(
        (status = 204, description = "Feedback deleted"),
        (status = 404, description = "Not Found", body = Problem),
        (status = 500, description = "Internal Server Error", body = Problem)
    )
)]
pub async fn delete_feedback(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ProblemResponse> {
    info!("Deleting feedback {}", id);

    match svc.delete_feedback(&id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            log_failure("delete_feedback", &e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
