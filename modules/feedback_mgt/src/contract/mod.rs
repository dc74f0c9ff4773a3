pub mod client;
pub mod error;
pub mod model;

pub use client::FeedbackMgtApi;
pub use error::FeedbackMgtError;
pub use model::{Feedback, FeedbackQuery, FeedbackUpdate, NewFeedback};
