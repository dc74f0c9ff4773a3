pub mod error;
pub mod filter;
pub mod query;
pub mod repo;
pub mod service;
