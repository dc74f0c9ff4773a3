//! SeaORM query builders for feedback listings and counts.
//!
//! Tag filters select owners through a subquery, so an entry whose tags match
//! several times still appears once in a page and counts once.

use modkit_db::like::like_expr;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{ColumnTrait, Condition, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect, Select};

use crate::domain::filter::{FilterAttribute, FilterClause};
use crate::domain::query::{ListPlan, SortAttribute, SortOrder};
use crate::infra::storage::entity::{feedback, feedback_tag};

/// Predicate selecting the entries matched by `clause`.
pub fn filter_condition(clause: &FilterClause) -> Condition {
    let pattern = like_expr(clause.pattern());
    match clause.attribute {
        FilterAttribute::Email => Condition::all().add(feedback::Column::Email.like(pattern)),
        FilterAttribute::Tag => Condition::all().add(
            feedback::Column::Id.in_subquery(
                Query::select()
                    .column(feedback_tag::Column::FeedbackId)
                    .from(feedback_tag::Entity)
                    .and_where(Expr::col(feedback_tag::Column::Tag).like(pattern))
                    .to_owned(),
            ),
        ),
    }
}

fn filtered(filter: Option<&FilterClause>) -> Select<feedback::Entity> {
    let select = feedback::Entity::find();
    match filter {
        Some(clause) => select.filter(filter_condition(clause)),
        None => select,
    }
}

fn sort_column(attribute: SortAttribute) -> feedback::Column {
    match attribute {
        SortAttribute::TimeCreated => feedback::Column::TimeCreated,
    }
}

fn sort_direction(order: SortOrder) -> Order {
    match order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    }
}

/// One page of rows: filter, resolved ordering with the surrogate key as a
/// tie-breaker in the same direction, then limit/offset.
pub fn select_page(plan: &ListPlan) -> Select<feedback::Entity> {
    let direction = sort_direction(plan.order);
    filtered(plan.filter.as_ref())
        .order_by(sort_column(plan.sort_by), direction.clone())
        .order_by(feedback::Column::Id, direction)
        .limit(plan.page.limit)
        .offset(plan.page.offset)
}

/// Rows counted by `count`; ordering and paging do not apply.
pub fn select_for_count(filter: Option<&FilterClause>) -> Select<feedback::Entity> {
    filtered(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::FilterOperator;
    use crate::domain::query::Pagination;
    use sea_orm::{DbBackend, QueryTrait};

    fn plan(filter: Option<FilterClause>, order: SortOrder) -> ListPlan {
        ListPlan {
            filter,
            page: Pagination { limit: 5, offset: 10 },
            sort_by: SortAttribute::TimeCreated,
            order,
        }
    }

    #[test]
    fn unfiltered_page_orders_and_paginates() {
        let sql = select_page(&plan(None, SortOrder::Desc))
            .build(DbBackend::Sqlite)
            .to_string();
        assert!(sql.contains(r#"ORDER BY "feedback"."time_created" DESC, "feedback"."id" DESC"#), "{sql}");
        assert!(sql.contains("LIMIT 5"), "{sql}");
        assert!(sql.contains("OFFSET 10"), "{sql}");
        assert!(!sql.contains("WHERE"), "{sql}");
    }

    #[test]
    fn email_filter_uses_escaped_like() {
        let clause = FilterClause::new(FilterAttribute::Email, FilterOperator::StartsWith, "a_b");
        let sql = select_page(&plan(Some(clause), SortOrder::Asc))
            .build(DbBackend::Sqlite)
            .to_string();
        assert!(sql.contains(r#""feedback"."email" LIKE 'a!_b%'"#), "{sql}");
        assert!(sql.contains("ESCAPE"), "{sql}");
    }

    #[test]
    fn tag_filter_selects_owners_through_subquery() {
        let clause = FilterClause::new(FilterAttribute::Tag, FilterOperator::Equals, "ui");
        let sql = select_for_count(Some(&clause))
            .build(DbBackend::Sqlite)
            .to_string();
        assert!(sql.contains(r#""feedback"."id" IN (SELECT "feedback_id" FROM "feedback_tags""#), "{sql}");
        assert!(sql.contains("LIKE 'ui'"), "{sql}");
    }
}
