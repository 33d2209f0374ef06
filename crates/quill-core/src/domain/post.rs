use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Author, Category, Tag};

const WORDS_PER_MINUTE: usize = 200;

/// Lifecycle status of a post. Either state can be set on create or update;
/// there are no automatic transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PostStatus {
    Draft,
    Published,
}

/// Post entity - the aggregate at the center of the content graph.
///
/// The author is fixed at creation. Category and tags are shared references;
/// the post owns neither lifecycle. `reading_time` is derived from content,
/// never client-supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub author: Author,
    pub category: Category,
    pub tags: Vec<Tag>,
    pub reading_time: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post with generated ID and timestamps, computing the
    /// reading time from the request content.
    pub fn new(author: Author, category: Category, tags: Vec<Tag>, req: CreatePostRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            reading_time: reading_time(&req.content),
            title: req.title,
            content: req.content,
            status: req.status,
            author,
            category,
            tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// The ids of the tags currently attached to this post.
    pub fn tag_ids(&self) -> BTreeSet<Uuid> {
        self.tags.iter().map(|t| t.id).collect()
    }
}

/// Estimated minutes to read `content`, at 200 whitespace-delimited words per
/// minute, rounded up. Empty content reads in zero minutes.
pub fn reading_time(content: &str) -> i32 {
    let words = content.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE) as i32
}

/// Validated input for creating a post. The acting user is supplied
/// separately by the authentication boundary.
#[derive(Debug, Clone)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub category_id: Uuid,
    pub tag_ids: BTreeSet<Uuid>,
    pub status: PostStatus,
}

/// Validated input for updating a post. Title, content and status are
/// overwritten unconditionally; category and tags are re-resolved only when
/// they differ from the stored post.
#[derive(Debug, Clone)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
    pub category_id: Uuid,
    pub tag_ids: BTreeSet<Uuid>,
    pub status: PostStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_time_of_empty_content_is_zero() {
        assert_eq!(reading_time(""), 0);
    }

    #[test]
    fn reading_time_rounds_up() {
        let content = vec!["word"; 201].join(" ");
        assert_eq!(reading_time(&content), 2);
    }

    #[test]
    fn reading_time_of_600_words_is_three_minutes() {
        let content = vec!["word"; 600].join(" ");
        assert_eq!(reading_time(&content), 3);
    }

    #[test]
    fn reading_time_of_short_content_is_one_minute() {
        assert_eq!(reading_time("just a few words"), 1);
    }
}
