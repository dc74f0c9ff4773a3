pub mod feedback;
pub mod feedback_tag;
