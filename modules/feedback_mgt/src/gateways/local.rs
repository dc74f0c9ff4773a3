use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::FeedbackMgtApi,
    error::FeedbackMgtError,
    model::{Feedback, FeedbackQuery, FeedbackUpdate, NewFeedback},
};
use crate::domain::service::Service;

/// Local implementation of the FeedbackMgtApi trait that delegates to the domain service
pub struct FeedbackMgtLocalClient {
    service: Arc<Service>,
}

impl FeedbackMgtLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl FeedbackMgtApi for FeedbackMgtLocalClient {
    async fn create(&self, new_feedback: NewFeedback) -> Result<Feedback, FeedbackMgtError> {
        self.service
            .create_feedback(new_feedback)
            .await
            .map_err(Into::into)
    }

    async fn list(&self, query: FeedbackQuery) -> Result<Vec<Feedback>, FeedbackMgtError> {
        self.service.list_feedback(query).await.map_err(Into::into)
    }

    async fn get(&self, id: &str) -> Result<Feedback, FeedbackMgtError> {
        self.service.get_feedback(id).await.map_err(Into::into)
    }

    async fn delete(&self, id: &str) -> Result<(), FeedbackMgtError> {
        self.service.delete_feedback(id).await.map_err(Into::into)
    }

    async fn update(
        &self,
        id: &str,
        update: FeedbackUpdate,
    ) -> Result<Feedback, FeedbackMgtError> {
        self.service
            .update_feedback(id, update)
            .await
            .map_err(Into::into)
    }

    async fn count(&self, filter: Option<String>) -> Result<u64, FeedbackMgtError> {
        self.service
            .count_feedback(filter.as_deref())
            .await
            .map_err(Into::into)
    }

    async fn exists(&self, id: &str) -> Result<bool, FeedbackMgtError> {
        self.service.feedback_exists(id).await.map_err(Into::into)
    }
}
