#![allow(dead_code)]

use feedback_mgt::config::FeedbackMgtConfig;
use feedback_mgt::contract::model::NewFeedback;
use feedback_mgt::FeedbackMgt;
use modkit_db::{ConnectOpts, DbHandle};
use sea_orm::DatabaseConnection;

/// Fresh in-memory SQLite database with the feedback schema applied.
pub async fn test_db() -> DatabaseConnection {
    let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default())
        .await
        .expect("Failed to connect to test database");
    let conn = db.sea();
    FeedbackMgt::migrate(&conn)
        .await
        .expect("Failed to run migrations");
    conn
}

pub async fn test_module(cfg: FeedbackMgtConfig) -> (FeedbackMgt, DatabaseConnection) {
    let conn = test_db().await;
    (FeedbackMgt::new(conn.clone(), &cfg), conn)
}

pub fn new_feedback(message: &str, email: Option<&str>, tags: &[&str]) -> NewFeedback {
    NewFeedback {
        message: message.to_string(),
        email: email.map(str::to_string),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..Default::default()
    }
}
