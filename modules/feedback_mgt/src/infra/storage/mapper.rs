use sea_orm::{ActiveValue::NotSet, Set};

use crate::contract::model::{Feedback, FeedbackUpdate};
use crate::infra::storage::entity::{feedback, feedback_tag};

/// Convert a database row plus its tags to a contract model
pub fn entity_to_contract(row: feedback::Model, tags: Vec<String>) -> Feedback {
    Feedback {
        id: row.external_id,
        message: row.message,
        email: row.email,
        contact_no: row.contact_no,
        user_id: row.user_id,
        tenant_id: row.tenant_id,
        tags,
        time_created: row.time_created,
    }
}

/// Active model for a fresh row; the surrogate key is left to the store.
pub fn contract_to_active(f: &Feedback) -> feedback::ActiveModel {
    feedback::ActiveModel {
        id: NotSet,
        external_id: Set(f.id.clone()),
        message: Set(f.message.clone()),
        email: Set(f.email.clone()),
        contact_no: Set(f.contact_no.clone()),
        user_id: Set(f.user_id.clone()),
        tenant_id: Set(f.tenant_id),
        time_created: Set(f.time_created),
    }
}

/// Active model overwriting the mutable columns of row `id`.
pub fn update_to_active(id: i64, update: &FeedbackUpdate) -> feedback::ActiveModel {
    feedback::ActiveModel {
        id: Set(id),
        message: Set(update.message.clone()),
        email: Set(update.email.clone()),
        contact_no: Set(update.contact_no.clone()),
        ..Default::default()
    }
}

pub fn tag_rows(feedback_id: i64, tags: &[String]) -> Vec<feedback_tag::ActiveModel> {
    tags.iter()
        .map(|tag| feedback_tag::ActiveModel {
            id: NotSet,
            feedback_id: Set(feedback_id),
            tag: Set(tag.clone()),
        })
        .collect()
}
