//! Post engine: create/update/delete with category and tag references
//! resolved up front, derived reading time, and published/draft visibility.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Author, CreatePostRequest, Post, PostStatus, UpdatePostRequest};
use crate::error::DomainError;
use crate::ports::PostRepository;
use crate::services::{CategoryService, TagService};

pub struct PostService {
    posts: Arc<dyn PostRepository>,
    categories: Arc<CategoryService>,
    tags: Arc<TagService>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        categories: Arc<CategoryService>,
        tags: Arc<TagService>,
    ) -> Self {
        Self {
            posts,
            categories,
            tags,
        }
    }

    /// Published posts, optionally filtered by category and/or tag
    /// (intersection when both are given). Filter references are resolved
    /// through the registries first, so an unknown id aborts with their
    /// NotFound instead of silently returning an empty list.
    pub async fn get_all_posts(
        &self,
        category_id: Option<Uuid>,
        tag_id: Option<Uuid>,
    ) -> Result<Vec<Post>, DomainError> {
        if let Some(id) = category_id {
            self.categories.get_by_id(id).await?;
        }
        if let Some(id) = tag_id {
            self.tags.get_by_id(id).await?;
        }

        Ok(self.posts.find_published(category_id, tag_id).await?)
    }

    /// Fetch any post by id, draft or published. Knowing the id is the only
    /// requirement: drafts stay reachable by direct link.
    pub async fn get_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Post does not exist".to_string()))
    }

    /// Drafts belonging to `author_id`. Callers must pass an identity resolved
    /// by the authentication orchestrator; ownership is never inferred from
    /// unauthenticated context.
    pub async fn get_draft_posts(&self, author_id: Uuid) -> Result<Vec<Post>, DomainError> {
        Ok(self
            .posts
            .find_by_author_and_status(author_id, PostStatus::Draft)
            .await?)
    }

    /// Create a post for `author`. Both references resolve before anything is
    /// persisted, so a missing category or tag aborts without a partial write.
    pub async fn create_post(
        &self,
        author: Author,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let category = self.categories.get_by_id(req.category_id).await?;
        let tags = self.tags.get_by_ids(&req.tag_ids).await?;

        let post = Post::new(author, category, tags, req);
        tracing::debug!(post_id = %post.id, status = ?post.status, "creating post");

        Ok(self.posts.save(post).await?)
    }

    /// Update a post. Title, content and status are overwritten; the category
    /// is re-resolved only when its id changed, and the tag set is replaced
    /// (not merged) only when the id set changed. The author is never altered,
    /// and reading_time keeps the value computed at creation.
    pub async fn update_post(&self, id: Uuid, req: UpdatePostRequest) -> Result<Post, DomainError> {
        let mut post = self.get_post(id).await?;

        post.title = req.title;
        post.content = req.content;
        post.status = req.status;

        if post.category.id != req.category_id {
            post.category = self.categories.get_by_id(req.category_id).await?;
        }

        if post.tag_ids() != req.tag_ids {
            post.tags = self.tags.get_by_ids(&req.tag_ids).await?;
        }

        post.updated_at = Utc::now();

        Ok(self.posts.save(post).await?)
    }

    /// Delete a post by id. Its category and tags are untouched.
    pub async fn delete_post(&self, id: Uuid) -> Result<(), DomainError> {
        self.get_post(id).await?;
        self.posts.delete(id).await?;
        Ok(())
    }
}
