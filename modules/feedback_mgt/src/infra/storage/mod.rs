pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod query_plan;
pub mod sea_orm_repo;

pub use sea_orm_repo::SeaOrmFeedbackRepository;
