use std::sync::Arc;

use chrono::Utc;
use modkit_db::TxError;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::contract::model::{Feedback, FeedbackQuery, FeedbackUpdate, NewFeedback};
use crate::domain::error::DomainError;
use crate::domain::filter::parse_filter;
use crate::domain::query::ListPlan;
use crate::domain::repo::FeedbackRepository;

/// Domain service with the business rules for feedback management.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn FeedbackRepository>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_search_limit: u64,
    pub require_message_on_update: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_search_limit: 30,
            require_message_on_update: true,
        }
    }
}

impl Service {
    pub fn new(repo: Arc<dyn FeedbackRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    #[instrument(
        name = "feedback_mgt.service.create_feedback",
        skip(self, new_feedback),
        fields(tags = new_feedback.tags.len())
    )]
    pub async fn create_feedback(&self, new_feedback: NewFeedback) -> Result<Feedback, DomainError> {
        info!("Creating feedback");

        validate_message(&new_feedback.message)?;

        let feedback = Feedback {
            id: Uuid::new_v4().to_string(),
            message: new_feedback.message,
            email: new_feedback.email,
            contact_no: new_feedback.contact_no,
            user_id: new_feedback.user_id,
            tenant_id: new_feedback.tenant_id,
            tags: new_feedback.tags,
            time_created: Utc::now(),
        };

        self.repo
            .insert(feedback.clone())
            .await
            .map_err(|e| store_error("insert", e))?;

        info!(feedback_id = %feedback.id, "Successfully created feedback");
        Ok(feedback)
    }

    #[instrument(name = "feedback_mgt.service.list_feedback", skip(self, query))]
    pub async fn list_feedback(&self, query: FeedbackQuery) -> Result<Vec<Feedback>, DomainError> {
        let plan = ListPlan::resolve(&query, self.config.default_search_limit)
            .inspect_err(|e| debug!(error = %e, "Rejected listing parameters"))?;
        debug!(?plan, "Listing feedback");

        let items = self
            .repo
            .list(&plan)
            .await
            .map_err(|e| store_error("list", e))?;

        debug!("Listed {} feedback entries", items.len());
        Ok(items)
    }

    #[instrument(name = "feedback_mgt.service.count_feedback", skip(self))]
    pub async fn count_feedback(&self, filter: Option<&str>) -> Result<u64, DomainError> {
        let clause = parse_filter(filter)
            .inspect_err(|e| debug!(error = %e, "Rejected filter"))?;

        self.repo
            .count(clause.as_ref())
            .await
            .map_err(|e| store_error("count", e))
    }

    #[instrument(name = "feedback_mgt.service.get_feedback", skip(self), fields(feedback_id = %id))]
    pub async fn get_feedback(&self, id: &str) -> Result<Feedback, DomainError> {
        debug!("Getting feedback by id");

        self.repo
            .find_by_external_id(id)
            .await
            .map_err(|e| store_error("find_by_external_id", e))?
            .ok_or_else(|| DomainError::not_found(id))
    }

    #[instrument(name = "feedback_mgt.service.feedback_exists", skip(self), fields(feedback_id = %id))]
    pub async fn feedback_exists(&self, id: &str) -> Result<bool, DomainError> {
        self.repo
            .exists(id)
            .await
            .map_err(|e| store_error("exists", e))
    }

    #[instrument(name = "feedback_mgt.service.delete_feedback", skip(self), fields(feedback_id = %id))]
    pub async fn delete_feedback(&self, id: &str) -> Result<(), DomainError> {
        info!("Deleting feedback");

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| store_error("delete", e))?;

        if !deleted {
            return Err(DomainError::not_found(id));
        }

        info!("Successfully deleted feedback");
        Ok(())
    }

    #[instrument(
        name = "feedback_mgt.service.update_feedback",
        skip(self, update),
        fields(feedback_id = %id, tags = update.tags.len())
    )]
    pub async fn update_feedback(
        &self,
        id: &str,
        update: FeedbackUpdate,
    ) -> Result<Feedback, DomainError> {
        info!("Updating feedback");

        if self.config.require_message_on_update {
            validate_message(&update.message)?;
        }

        let updated = self
            .repo
            .update(id, update)
            .await
            .map_err(|e| store_error("update", e))?
            .ok_or_else(|| DomainError::not_found(id))?;

        info!("Successfully updated feedback");
        Ok(updated)
    }
}

fn validate_message(message: &str) -> Result<(), DomainError> {
    if message.trim().is_empty() {
        return Err(DomainError::FeedbackMessageRequired);
    }
    Ok(())
}

/// Log a store failure with its full cause chain and turn it into an opaque domain error.
fn store_error(op: &str, e: anyhow::Error) -> DomainError {
    error!(op, error = %format!("{e:#}"), "Feedback store operation failed");
    let rollback_failed = e
        .downcast_ref::<TxError>()
        .is_some_and(TxError::is_rollback_failure);
    if rollback_failed {
        DomainError::transaction_rollback(e.to_string())
    } else {
        DomainError::database(e.to_string())
    }
}
