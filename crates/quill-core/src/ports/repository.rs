use std::collections::BTreeSet;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Category, CategoryWithPostCount, Post, PostStatus, Tag, TagWithPostCount, User,
};
use crate::error::RepoError;

/// Outcome of a guarded delete (categories and tags).
///
/// The reference check and the delete must execute as one atomic unit in every
/// implementation, so a concurrent post creation cannot slip between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteGuard {
    /// The entity existed, nothing referenced it, and it was removed.
    Removed,
    /// No entity with that id exists.
    Missing,
    /// At least one post references the entity; nothing was deleted.
    Referenced,
}

/// User repository.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepoError>;

    async fn save(&self, user: User) -> Result<User, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError>;

    /// All categories with their published-post counts.
    async fn find_all_with_post_counts(&self) -> Result<Vec<CategoryWithPostCount>, RepoError>;

    /// Case-insensitive name existence check.
    async fn exists_by_name(&self, name: &str) -> Result<bool, RepoError>;

    async fn save(&self, category: Category) -> Result<Category, RepoError>;

    /// Delete the category unless a post references it.
    async fn delete_guarded(&self, id: Uuid) -> Result<DeleteGuard, RepoError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, RepoError>;

    /// All tags with their published-post counts.
    async fn find_all_with_post_counts(&self) -> Result<Vec<TagWithPostCount>, RepoError>;

    /// Tags whose name matches any of `names` exactly.
    async fn find_by_names(&self, names: &BTreeSet<String>) -> Result<Vec<Tag>, RepoError>;

    /// Tags whose id matches any of `ids`, in a single batch query. Missing
    /// ids are simply absent from the result; the all-or-nothing rule lives
    /// in the service.
    async fn find_all_by_ids(&self, ids: &BTreeSet<Uuid>) -> Result<Vec<Tag>, RepoError>;

    async fn save_all(&self, tags: Vec<Tag>) -> Result<Vec<Tag>, RepoError>;

    /// Delete the tag unless a post references it.
    async fn delete_guarded(&self, id: Uuid) -> Result<DeleteGuard, RepoError>;
}

/// Post repository. Posts are stored as full aggregates: author, category and
/// tags come back hydrated.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Published posts, optionally narrowed to a category and/or a tag
    /// (intersection when both are given). No ordering contract.
    async fn find_published(
        &self,
        category_id: Option<Uuid>,
        tag_id: Option<Uuid>,
    ) -> Result<Vec<Post>, RepoError>;

    /// Posts by `author_id` in the given status.
    async fn find_by_author_and_status(
        &self,
        author_id: Uuid,
        status: PostStatus,
    ) -> Result<Vec<Post>, RepoError>;

    /// Create or update a post, replacing its tag associations.
    async fn save(&self, post: Post) -> Result<Post, RepoError>;

    /// Delete by id; `RepoError::NotFound` if no row was affected.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}
