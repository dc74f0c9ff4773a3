use async_trait::async_trait;

use crate::contract::{
    error::FeedbackMgtError,
    model::{Feedback, FeedbackQuery, FeedbackUpdate, NewFeedback},
};

/// Public API trait for the feedback_mgt module that other modules can use
#[async_trait]
pub trait FeedbackMgtApi: Send + Sync {
    /// Create an entry; assigns its external id and creation time
    async fn create(&self, new_feedback: NewFeedback) -> Result<Feedback, FeedbackMgtError>;

    /// List entries matching an optional filter, sorted and paginated
    async fn list(&self, query: FeedbackQuery) -> Result<Vec<Feedback>, FeedbackMgtError>;

    /// Get an entry by external id
    async fn get(&self, id: &str) -> Result<Feedback, FeedbackMgtError>;

    /// Delete an entry and its tags
    async fn delete(&self, id: &str) -> Result<(), FeedbackMgtError>;

    /// Overwrite an entry, replacing its tag set
    async fn update(&self, id: &str, update: FeedbackUpdate)
        -> Result<Feedback, FeedbackMgtError>;

    /// Count entries matching an optional filter
    async fn count(&self, filter: Option<String>) -> Result<u64, FeedbackMgtError>;

    async fn exists(&self, id: &str) -> Result<bool, FeedbackMgtError>;
}
