//! Data Transfer Objects - request/response types for the API.
//!
//! Field names are camelCase on the wire.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request to authenticate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response to a successful authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    /// Token validity window in seconds; constant across all issuances.
    pub expires_in: u64,
}

/// Request to create a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

/// A category with its published-post count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: Uuid,
    pub name: String,
    pub post_count: u64,
}

/// Request to create one or more tags by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTagsRequest {
    pub names: BTreeSet<String>,
}

/// A tag, with its published-post count when listing (creation responses
/// omit the count).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDto {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_count: Option<u64>,
}

/// The author projection embedded in a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorDto {
    pub id: Uuid,
    pub name: String,
}

/// A tag reference embedded in a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRefDto {
    pub id: Uuid,
    pub name: String,
}

/// A category reference embedded in a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRefDto {
    pub id: Uuid,
    pub name: String,
}

/// A full post as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub status: String,
    pub author: AuthorDto,
    pub category: CategoryRefDto,
    pub tags: Vec<TagRefDto>,
    pub reading_time: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequestDto {
    pub title: String,
    pub content: String,
    pub category_id: Uuid,
    #[serde(default)]
    pub tag_ids: BTreeSet<Uuid>,
    pub status: String,
}

/// Request to update a post. The author cannot be changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequestDto {
    pub title: String,
    pub content: String,
    pub category_id: Uuid,
    #[serde(default)]
    pub tag_ids: BTreeSet<Uuid>,
    pub status: String,
}

/// Query parameters for the post listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListQuery {
    pub category_id: Option<Uuid>,
    pub tag_id: Option<Uuid>,
}
