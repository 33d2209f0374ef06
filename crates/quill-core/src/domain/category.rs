use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category entity - a one-to-many grouping of posts.
///
/// Names are unique case-insensitively. A category cannot be deleted while any
/// post references it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

impl Category {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}

/// A category together with its number of published posts, as returned by
/// the listing operation.
#[derive(Debug, Clone)]
pub struct CategoryWithPostCount {
    pub category: Category,
    pub post_count: u64,
}
