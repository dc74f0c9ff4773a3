use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::contract::model::{
    Feedback, FeedbackQuery, FeedbackUpdate, NewFeedback, SUPER_TENANT_ID,
};

/// REST DTO for feedback representation with serde/utoipa
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDto {
    /// External id of the entry.
    pub id: String,
    pub message: String,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub user_id: Option<String>,
    pub tenant_id: i32,
    pub tags: Vec<String>,
    pub time_created: DateTime<Utc>,
}

/// REST DTO for submitting feedback
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackReq {
    pub message: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact_no: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    /// Defaults to the super tenant (-1234).
    #[serde(default)]
    pub tenant_id: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// REST DTO for overwriting an entry; omitted fields are cleared
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeedbackReq {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact_no: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// REST DTO for one page of a listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackListDto {
    pub items: Vec<FeedbackDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackCountDto {
    pub count: u64,
}

/// Query parameters of `GET /feedback`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ListFeedbackQuery {
    /// `<attribute> <operator> <value>`; attributes `email`, `tag`; operators `eq`, `sw`, `ew`, `co`.
    pub filter: Option<String>,
    /// Page size; 0 or absent selects the server default.
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Only `time_created` is supported.
    pub sort_by: Option<String>,
    /// `asc` (default) or `desc`.
    pub sort_order: Option<String>,
}

/// Query parameters of `GET /feedback/count`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CountFeedbackQuery {
    pub filter: Option<String>,
}

// Conversion implementations between REST DTOs and contract models

impl From<Feedback> for FeedbackDto {
    fn from(f: Feedback) -> Self {
        Self {
            id: f.id,
            message: f.message,
            email: f.email,
            contact_no: f.contact_no,
            user_id: f.user_id,
            tenant_id: f.tenant_id,
            tags: f.tags,
            time_created: f.time_created,
        }
    }
}

impl From<CreateFeedbackReq> for NewFeedback {
    fn from(req: CreateFeedbackReq) -> Self {
        Self {
            message: req.message,
            email: req.email,
            contact_no: req.contact_no,
            user_id: req.user_id,
            tenant_id: req.tenant_id.unwrap_or(SUPER_TENANT_ID),
            tags: req.tags,
        }
    }
}

impl From<UpdateFeedbackReq> for FeedbackUpdate {
    fn from(req: UpdateFeedbackReq) -> Self {
        Self {
            message: req.message,
            email: req.email,
            contact_no: req.contact_no,
            tags: req.tags,
        }
    }
}

impl From<ListFeedbackQuery> for FeedbackQuery {
    fn from(q: ListFeedbackQuery) -> Self {
        Self {
            filter: q.filter,
            limit: q.limit.unwrap_or(0),
            offset: q.offset.unwrap_or(0),
            sort_by: q.sort_by,
            sort_order: q.sort_order,
        }
    }
}
