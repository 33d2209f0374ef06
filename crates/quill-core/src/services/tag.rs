//! Tag registry: idempotent bulk creation, all-or-nothing batch lookup, and
//! deletion guarded by post association.

use std::collections::BTreeSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Tag, TagWithPostCount};
use crate::error::DomainError;
use crate::ports::{DeleteGuard, TagRepository};

pub struct TagService {
    tags: Arc<dyn TagRepository>,
}

impl TagService {
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }

    pub async fn list(&self) -> Result<Vec<TagWithPostCount>, DomainError> {
        Ok(self.tags.find_all_with_post_counts().await?)
    }

    /// Create the subset of `names` that does not match an existing tag name,
    /// and return the union of newly created and pre-existing matches. Retrying
    /// with the same name set is therefore idempotent.
    pub async fn create_many(&self, names: BTreeSet<String>) -> Result<Vec<Tag>, DomainError> {
        let existing = self.tags.find_by_names(&names).await?;
        let existing_names: BTreeSet<&str> = existing.iter().map(|t| t.name.as_str()).collect();

        let new_tags: Vec<Tag> = names
            .iter()
            .filter(|name| !existing_names.contains(name.as_str()))
            .map(|name| Tag::new(name.clone()))
            .collect();

        let mut saved = if new_tags.is_empty() {
            Vec::new()
        } else {
            self.tags.save_all(new_tags).await?
        };

        saved.extend(existing);
        Ok(saved)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Tag, DomainError> {
        self.tags
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("No tag was found".to_string()))
    }

    /// All-or-nothing batch resolution: a single query plus a count
    /// comparison, so it stays atomic under concurrent tag deletion.
    pub async fn get_by_ids(&self, ids: &BTreeSet<Uuid>) -> Result<Vec<Tag>, DomainError> {
        let found = self.tags.find_all_by_ids(ids).await?;

        if found.len() != ids.len() {
            return Err(DomainError::NotFound(
                "Not all specified tag IDs exist".to_string(),
            ));
        }

        Ok(found)
    }

    /// Delete a tag. Fails while any post references it; a missing id is a
    /// no-op.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        match self.tags.delete_guarded(id).await? {
            DeleteGuard::Referenced => Err(DomainError::Conflict(
                "Cannot delete tag with posts".to_string(),
            )),
            DeleteGuard::Removed | DeleteGuard::Missing => Ok(()),
        }
    }
}
