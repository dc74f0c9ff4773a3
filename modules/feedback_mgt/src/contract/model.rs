use chrono::{DateTime, Utc};

/// Tenant assigned to records created without an explicit tenant.
pub const SUPER_TENANT_ID: i32 = -1234;

/// A feedback entry as seen by callers. The internal surrogate key never leaves the module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub id: String,
    pub message: String,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub user_id: Option<String>,
    pub tenant_id: i32,
    pub tags: Vec<String>,
    pub time_created: DateTime<Utc>,
}

/// Data for creating a new feedback entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub message: String,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub user_id: Option<String>,
    pub tenant_id: i32,
    pub tags: Vec<String>,
}

impl Default for NewFeedback {
    fn default() -> Self {
        Self {
            message: String::new(),
            email: None,
            contact_no: None,
            user_id: None,
            tenant_id: SUPER_TENANT_ID,
            tags: Vec::new(),
        }
    }
}

/// Full replacement of the mutable fields of an entry, tags included.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedbackUpdate {
    pub message: String,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub tags: Vec<String>,
}

/// Raw listing parameters as supplied by a caller; resolved and validated by the domain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedbackQuery {
    /// `"<attribute> <operator> <value>"`, e.g. `"email sw alice"`.
    pub filter: Option<String>,
    /// `0` selects the configured default page size.
    pub limit: i64,
    pub offset: i64,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}
