//! Projections from domain types to wire DTOs.

use quill_core::domain::{CategoryWithPostCount, Post, PostStatus, Tag, TagWithPostCount};
use quill_shared::{AuthorDto, CategoryDto, CategoryRefDto, PostDto, TagDto, TagRefDto};

use crate::middleware::error::ApiError;

pub fn to_post_dto(post: Post) -> PostDto {
    PostDto {
        id: post.id,
        title: post.title,
        content: post.content,
        status: status_label(post.status).to_string(),
        author: AuthorDto {
            id: post.author.id,
            name: post.author.name,
        },
        category: CategoryRefDto {
            id: post.category.id,
            name: post.category.name,
        },
        tags: post.tags.into_iter().map(to_tag_ref_dto).collect(),
        reading_time: post.reading_time,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

pub fn to_category_dto(counted: CategoryWithPostCount) -> CategoryDto {
    CategoryDto {
        id: counted.category.id,
        name: counted.category.name,
        post_count: counted.post_count,
    }
}

pub fn to_counted_tag_dto(counted: TagWithPostCount) -> TagDto {
    TagDto {
        id: counted.tag.id,
        name: counted.tag.name,
        post_count: Some(counted.post_count),
    }
}

pub fn to_tag_dto(tag: Tag) -> TagDto {
    TagDto {
        id: tag.id,
        name: tag.name,
        post_count: None,
    }
}

fn to_tag_ref_dto(tag: Tag) -> TagRefDto {
    TagRefDto {
        id: tag.id,
        name: tag.name,
    }
}

pub fn status_label(status: PostStatus) -> &'static str {
    match status {
        PostStatus::Draft => "DRAFT",
        PostStatus::Published => "PUBLISHED",
    }
}

pub fn parse_status(value: &str) -> Result<PostStatus, ApiError> {
    match value {
        "DRAFT" => Ok(PostStatus::Draft),
        "PUBLISHED" => Ok(PostStatus::Published),
        other => Err(ApiError::BadRequest(format!(
            "Invalid post status: {other}"
        ))),
    }
}
