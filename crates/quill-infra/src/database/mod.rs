//! Persistence: SeaORM entities, Postgres repositories, and the in-memory
//! fallback store.

mod connections;
pub mod entity;
pub mod memory;
pub mod postgres_repo;

pub use connections::{DatabaseConfig, DatabaseConnection};
pub use memory::InMemoryStore;
pub use postgres_repo::{
    PostgresCategoryRepository, PostgresPostRepository, PostgresTagRepository,
    PostgresUserRepository,
};

#[cfg(test)]
mod tests;
