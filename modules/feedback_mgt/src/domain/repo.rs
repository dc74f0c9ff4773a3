use async_trait::async_trait;

use crate::contract::model::{Feedback, FeedbackUpdate};
use crate::domain::filter::FilterClause;
use crate::domain::query::ListPlan;

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
///
/// Multi-statement writes are atomic: either every statement lands or none does.
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Insert a fully-formed entry together with its tags.
    ///
    /// Service computes external id/timestamps/validation; repo persists.
    async fn insert(&self, feedback: Feedback) -> anyhow::Result<()>;

    /// One page of entries, each with its full tag set.
    async fn list(&self, plan: &ListPlan) -> anyhow::Result<Vec<Feedback>>;

    /// Number of distinct entries matching `filter`.
    async fn count(&self, filter: Option<&FilterClause>) -> anyhow::Result<u64>;

    /// Load an entry by external id.
    async fn find_by_external_id(&self, id: &str) -> anyhow::Result<Option<Feedback>>;

    async fn exists(&self, id: &str) -> anyhow::Result<bool>;

    /// Delete an entry and its tags. Returns false if the id does not resolve.
    async fn delete(&self, id: &str) -> anyhow::Result<bool>;

    /// Overwrite an entry and replace its tags, returning the reloaded entry.
    /// Returns `None` if the id does not resolve.
    async fn update(&self, id: &str, update: FeedbackUpdate) -> anyhow::Result<Option<Feedback>>;
}
