use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag entity - a many-to-many label on posts.
///
/// Names are deduplicated at bulk-creation time only, not enforced as a hard
/// constraint thereafter. A tag cannot be deleted while any post references
/// it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

impl Tag {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}

/// A tag together with its number of published posts.
#[derive(Debug, Clone)]
pub struct TagWithPostCount {
    pub tag: Tag,
    pub post_count: u64,
}
