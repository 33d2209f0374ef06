//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{CategoryRepository, PostRepository, TagRepository, UserRepository};
use quill_core::services::{AuthenticationService, CategoryService, PostService, TagService};
use quill_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
use quill_infra::database::{
    DatabaseConnection, InMemoryStore, PostgresCategoryRepository, PostgresPostRepository,
    PostgresTagRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

type Repositories = (
    Arc<dyn UserRepository>,
    Arc<dyn CategoryRepository>,
    Arc<dyn TagRepository>,
    Arc<dyn PostRepository>,
);

/// Shared application state: the services every handler talks to.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthenticationService>,
    pub categories: Arc<CategoryService>,
    pub tags: Arc<TagService>,
    pub posts: Arc<PostService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let repos = match &config.database {
            Some(db_config) => match DatabaseConnection::init(db_config).await {
                Ok(db) => postgres_repositories(db),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    in_memory_repositories()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running with the in-memory store.");
                in_memory_repositories()
            }
        };
        let (users, categories, tags, posts) = repos;

        let tokens = Arc::new(JwtTokenService::new(JwtConfig::new(
            config.jwt_secret.clone(),
        )));
        let passwords = Arc::new(Argon2PasswordService::new());

        let auth = Arc::new(AuthenticationService::new(users, passwords, tokens));
        let categories = Arc::new(CategoryService::new(categories));
        let tags = Arc::new(TagService::new(tags));
        let posts = Arc::new(PostService::new(posts, categories.clone(), tags.clone()));

        tracing::info!("Application state initialized");

        Self {
            auth,
            categories,
            tags,
            posts,
        }
    }
}

fn postgres_repositories(db: DatabaseConnection) -> Repositories {
    let conn = db.conn;
    (
        Arc::new(PostgresUserRepository::new(conn.clone())),
        Arc::new(PostgresCategoryRepository::new(conn.clone())),
        Arc::new(PostgresTagRepository::new(conn.clone())),
        Arc::new(PostgresPostRepository::new(conn)),
    )
}

fn in_memory_repositories() -> Repositories {
    let store = Arc::new(InMemoryStore::new());
    (store.clone(), store.clone(), store.clone(), store)
}
