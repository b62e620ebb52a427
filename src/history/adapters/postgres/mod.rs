//! `PostgreSQL` adapters for history persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresHistoryRepository;
