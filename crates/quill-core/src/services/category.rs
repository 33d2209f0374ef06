//! Category registry: a uniqueness-enforced catalog with deletion guarded by
//! post association.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Category, CategoryWithPostCount};
use crate::error::DomainError;
use crate::ports::{CategoryRepository, DeleteGuard};

pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    pub async fn list(&self) -> Result<Vec<CategoryWithPostCount>, DomainError> {
        Ok(self.categories.find_all_with_post_counts().await?)
    }

    /// Create a category; names are unique case-insensitively.
    pub async fn create(&self, name: &str) -> Result<Category, DomainError> {
        if self.categories.exists_by_name(name).await? {
            return Err(DomainError::Conflict(format!(
                "Category already exists with name {name}"
            )));
        }

        Ok(self.categories.save(Category::new(name.to_string())).await?)
    }

    /// The lookup every post mutation uses to resolve its category reference.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Category, DomainError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Category not found".to_string()))
    }

    /// Delete a category. Fails while any post references it; a missing id is
    /// a no-op. Never cascades to posts.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        match self.categories.delete_guarded(id).await? {
            DeleteGuard::Referenced => Err(DomainError::Conflict(
                "Category has posts associated with it".to_string(),
            )),
            DeleteGuard::Removed | DeleteGuard::Missing => Ok(()),
        }
    }
}
