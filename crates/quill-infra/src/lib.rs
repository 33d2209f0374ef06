//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! Argon2 password hashing, JWT token signing, SeaORM/Postgres repositories,
//! and in-memory repositories used as the no-database fallback and as the
//! substrate for service-level tests.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, DatabaseConnection, InMemoryStore};
