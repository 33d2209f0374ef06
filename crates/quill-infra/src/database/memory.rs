//! In-memory repositories - used as fallback when no database is configured,
//! and as the substrate for service-level tests.
//!
//! One store backs all four repositories so the category/tag delete guards
//! can check references and delete inside a single lock scope, mirroring the
//! single-transaction guarantee of the Postgres implementation.
//! Note: Data is lost on process restart.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{
    Category, CategoryWithPostCount, Post, PostStatus, Tag, TagWithPostCount, User,
};
use quill_core::error::RepoError;
use quill_core::ports::{
    CategoryRepository, DeleteGuard, PostRepository, TagRepository, UserRepository,
};

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    categories: HashMap<Uuid, Category>,
    tags: HashMap<Uuid, Tag>,
    posts: HashMap<Uuid, Post>,
}

impl Inner {
    fn published_count_for_category(&self, category_id: Uuid) -> u64 {
        self.posts
            .values()
            .filter(|p| p.status == PostStatus::Published && p.category.id == category_id)
            .count() as u64
    }

    fn published_count_for_tag(&self, tag_id: Uuid) -> u64 {
        self.posts
            .values()
            .filter(|p| p.status == PostStatus::Published && p.tags.iter().any(|t| t.id == tag_id))
            .count() as u64
    }
}

/// In-memory store implementing every repository port.
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().any(|u| u.email == email))
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut inner = self.inner.write().await;
        if inner
            .users
            .values()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.categories.get(&id).cloned())
    }

    async fn find_all_with_post_counts(&self) -> Result<Vec<CategoryWithPostCount>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner
            .categories
            .values()
            .map(|c| CategoryWithPostCount {
                category: c.clone(),
                post_count: inner.published_count_for_category(c.id),
            })
            .collect())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, RepoError> {
        let inner = self.inner.read().await;
        let lowered = name.to_lowercase();
        Ok(inner
            .categories
            .values()
            .any(|c| c.name.to_lowercase() == lowered))
    }

    async fn save(&self, category: Category) -> Result<Category, RepoError> {
        let mut inner = self.inner.write().await;
        inner.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn delete_guarded(&self, id: Uuid) -> Result<DeleteGuard, RepoError> {
        // Single write-lock scope: the reference check and the removal are
        // atomic with respect to concurrent post creation.
        let mut inner = self.inner.write().await;

        if !inner.categories.contains_key(&id) {
            return Ok(DeleteGuard::Missing);
        }
        if inner.posts.values().any(|p| p.category.id == id) {
            return Ok(DeleteGuard::Referenced);
        }

        inner.categories.remove(&id);
        Ok(DeleteGuard::Removed)
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.tags.get(&id).cloned())
    }

    async fn find_all_with_post_counts(&self) -> Result<Vec<TagWithPostCount>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner
            .tags
            .values()
            .map(|t| TagWithPostCount {
                tag: t.clone(),
                post_count: inner.published_count_for_tag(t.id),
            })
            .collect())
    }

    async fn find_by_names(&self, names: &BTreeSet<String>) -> Result<Vec<Tag>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner
            .tags
            .values()
            .filter(|t| names.contains(&t.name))
            .cloned()
            .collect())
    }

    async fn find_all_by_ids(&self, ids: &BTreeSet<Uuid>) -> Result<Vec<Tag>, RepoError> {
        let inner = self.inner.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| inner.tags.get(id).cloned())
            .collect())
    }

    async fn save_all(&self, tags: Vec<Tag>) -> Result<Vec<Tag>, RepoError> {
        let mut inner = self.inner.write().await;
        for tag in &tags {
            inner.tags.insert(tag.id, tag.clone());
        }
        Ok(tags)
    }

    async fn delete_guarded(&self, id: Uuid) -> Result<DeleteGuard, RepoError> {
        let mut inner = self.inner.write().await;

        if !inner.tags.contains_key(&id) {
            return Ok(DeleteGuard::Missing);
        }
        if inner
            .posts
            .values()
            .any(|p| p.tags.iter().any(|t| t.id == id))
        {
            return Ok(DeleteGuard::Referenced);
        }

        inner.tags.remove(&id);
        Ok(DeleteGuard::Removed)
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.posts.get(&id).cloned())
    }

    async fn find_published(
        &self,
        category_id: Option<Uuid>,
        tag_id: Option<Uuid>,
    ) -> Result<Vec<Post>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner
            .posts
            .values()
            .filter(|p| p.status == PostStatus::Published)
            .filter(|p| category_id.is_none_or(|id| p.category.id == id))
            .filter(|p| tag_id.is_none_or(|id| p.tags.iter().any(|t| t.id == id)))
            .cloned()
            .collect())
    }

    async fn find_by_author_and_status(
        &self,
        author_id: Uuid,
        status: PostStatus,
    ) -> Result<Vec<Post>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner
            .posts
            .values()
            .filter(|p| p.author.id == author_id && p.status == status)
            .cloned()
            .collect())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut inner = self.inner.write().await;
        inner.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;
        if inner.posts.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
