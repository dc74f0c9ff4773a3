//! SeaORM-backed repository implementation for the domain port.
//!
//! Every multi-statement operation runs in one transaction: the body is executed
//! against the `DatabaseTransaction` and its outcome handed to
//! [`modkit_db::finish_tx`], which commits or rolls back. Reads that touch both
//! tables (list, get) also run in a transaction so rows and tags come from the
//! same snapshot.

use std::collections::HashMap;

use anyhow::Context;
use modkit_db::finish_tx;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::contract::model::{Feedback, FeedbackUpdate};
use crate::domain::filter::FilterClause;
use crate::domain::query::ListPlan;
use crate::domain::repo::FeedbackRepository;
use crate::infra::storage::entity::{feedback, feedback_tag};
use crate::infra::storage::{mapper, query_plan};

/// Owner ids bound per tag query; keeps every statement under the driver's
/// bound-parameter limit (32766 on SQLite) whatever the page size.
const TAG_FETCH_CHUNK: usize = 500;

/// Tag rows per `INSERT`; each row binds two parameters.
const TAG_INSERT_CHUNK: usize = 500;

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmFeedbackRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmFeedbackRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> FeedbackRepository for SeaOrmFeedbackRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync + 'static,
{
    async fn insert(&self, feedback: Feedback) -> anyhow::Result<()> {
        let txn = self.conn.begin().await.context("insert: begin failed")?;
        let res = insert_with_tags(&txn, &feedback).await;
        finish_tx(txn, res).await.context("insert failed")
    }

    async fn list(&self, plan: &ListPlan) -> anyhow::Result<Vec<Feedback>> {
        let txn = self.conn.begin().await.context("list: begin failed")?;
        let res = load_page(&txn, plan).await;
        finish_tx(txn, res).await.context("list failed")
    }

    async fn count(&self, filter: Option<&FilterClause>) -> anyhow::Result<u64> {
        query_plan::select_for_count(filter)
            .count(&self.conn)
            .await
            .context("count failed")
    }

    async fn find_by_external_id(&self, id: &str) -> anyhow::Result<Option<Feedback>> {
        let txn = self.conn.begin().await.context("find: begin failed")?;
        let res = load_one(&txn, id).await;
        finish_tx(txn, res).await.context("find_by_external_id failed")
    }

    async fn exists(&self, id: &str) -> anyhow::Result<bool> {
        let found = feedback::Entity::find()
            .filter(feedback::Column::ExternalId.eq(id))
            .count(&self.conn)
            .await
            .context("exists failed")?;
        Ok(found > 0)
    }

    async fn delete(&self, id: &str) -> anyhow::Result<bool> {
        let txn = self.conn.begin().await.context("delete: begin failed")?;
        let res = delete_with_tags(&txn, id).await;
        finish_tx(txn, res).await.context("delete failed")
    }

    async fn update(&self, id: &str, update: FeedbackUpdate) -> anyhow::Result<Option<Feedback>> {
        let txn = self.conn.begin().await.context("update: begin failed")?;
        let res = update_with_tags(&txn, id, &update).await;
        finish_tx(txn, res).await.context("update failed")
    }
}

// --- transaction bodies ---

async fn insert_with_tags(txn: &DatabaseTransaction, f: &Feedback) -> Result<(), DbErr> {
    let row = mapper::contract_to_active(f).insert(txn).await?;
    insert_tags(txn, row.id, &f.tags).await
}

async fn load_page(txn: &DatabaseTransaction, plan: &ListPlan) -> Result<Vec<Feedback>, DbErr> {
    let rows = query_plan::select_page(plan).all(txn).await?;
    attach_tags(txn, rows).await
}

async fn load_one(txn: &DatabaseTransaction, id: &str) -> Result<Option<Feedback>, DbErr> {
    let Some(row) = feedback::Entity::find()
        .filter(feedback::Column::ExternalId.eq(id))
        .one(txn)
        .await?
    else {
        return Ok(None);
    };
    Ok(attach_tags(txn, vec![row]).await?.pop())
}

async fn delete_with_tags(txn: &DatabaseTransaction, id: &str) -> Result<bool, DbErr> {
    let Some(pk) = resolve_internal_id(txn, id).await? else {
        return Ok(false);
    };
    delete_tags(txn, pk).await?;
    let res = feedback::Entity::delete_by_id(pk).exec(txn).await?;
    Ok(res.rows_affected > 0)
}

async fn update_with_tags(
    txn: &DatabaseTransaction,
    id: &str,
    update: &FeedbackUpdate,
) -> Result<Option<Feedback>, DbErr> {
    let Some(pk) = resolve_internal_id(txn, id).await? else {
        return Ok(None);
    };
    let row = mapper::update_to_active(pk, update).update(txn).await?;

    // full replace, no diffing
    delete_tags(txn, pk).await?;
    insert_tags(txn, pk, &update.tags).await?;

    Ok(attach_tags(txn, vec![row]).await?.pop())
}

// --- helpers ---

/// The existence check behind every write addressed by external id.
async fn resolve_internal_id<C: ConnectionTrait>(
    conn: &C,
    external_id: &str,
) -> Result<Option<i64>, DbErr> {
    feedback::Entity::find()
        .select_only()
        .column(feedback::Column::Id)
        .filter(feedback::Column::ExternalId.eq(external_id))
        .into_tuple::<i64>()
        .one(conn)
        .await
}

async fn insert_tags<C: ConnectionTrait>(
    conn: &C,
    feedback_id: i64,
    tags: &[String],
) -> Result<(), DbErr> {
    for chunk in tags.chunks(TAG_INSERT_CHUNK) {
        feedback_tag::Entity::insert_many(mapper::tag_rows(feedback_id, chunk))
            .exec_without_returning(conn)
            .await?;
    }
    Ok(())
}

async fn delete_tags<C: ConnectionTrait>(conn: &C, feedback_id: i64) -> Result<(), DbErr> {
    feedback_tag::Entity::delete_many()
        .filter(feedback_tag::Column::FeedbackId.eq(feedback_id))
        .exec(conn)
        .await?;
    Ok(())
}

/// Fetch the tags of all `rows` in batches of owner ids and merge them in,
/// keeping row order and per-entry tag insertion order.
async fn attach_tags<C: ConnectionTrait>(
    conn: &C,
    rows: Vec<feedback::Model>,
) -> Result<Vec<Feedback>, DbErr> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut by_owner: HashMap<i64, Vec<String>> = HashMap::new();
    // an owner's tags always fall into a single chunk
    for chunk in ids.chunks(TAG_FETCH_CHUNK) {
        let tag_rows = feedback_tag::Entity::find()
            .filter(feedback_tag::Column::FeedbackId.is_in(chunk.iter().copied()))
            .order_by_asc(feedback_tag::Column::Id)
            .all(conn)
            .await?;
        for t in tag_rows {
            by_owner.entry(t.feedback_id).or_default().push(t.tag);
        }
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let tags = by_owner.remove(&row.id).unwrap_or_default();
            mapper::entity_to_contract(row, tags)
        })
        .collect())
}
