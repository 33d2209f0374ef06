//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{CreatePostRequest, UpdatePostRequest};
use quill_shared::{CreatePostRequestDto, PostDto, PostListQuery, UpdatePostRequestDto};

use crate::mappers::{parse_status, to_post_dto};
use crate::middleware::auth::Identity;
use crate::middleware::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /api/v1/posts
///
/// Published posts only. `categoryId` and `tagId` filters intersect when both
/// are present; an unknown filter id is a 404, not an empty list.
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> ApiResult<HttpResponse> {
    let posts = state
        .posts
        .get_all_posts(query.category_id, query.tag_id)
        .await?;
    let body: Vec<PostDto> = posts.into_iter().map(to_post_dto).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/v1/posts/drafts
pub async fn drafts(state: web::Data<AppState>, identity: Identity) -> ApiResult<HttpResponse> {
    let posts = state.posts.get_draft_posts(identity.0.id).await?;
    let body: Vec<PostDto> = posts.into_iter().map(to_post_dto).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/v1/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> ApiResult<HttpResponse> {
    let post = state.posts.get_post(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(to_post_dto(post)))
}

/// POST /api/v1/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequestDto>,
) -> ApiResult<HttpResponse> {
    let dto = body.into_inner();
    validate_post_fields(&dto.title, &dto.content)?;

    let req = CreatePostRequest {
        title: dto.title,
        content: dto.content,
        category_id: dto.category_id,
        tag_ids: dto.tag_ids,
        status: parse_status(&dto.status)?,
    };

    let post = state.posts.create_post(identity.0.as_author(), req).await?;

    Ok(HttpResponse::Created().json(to_post_dto(post)))
}

/// PUT /api/v1/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequestDto>,
) -> ApiResult<HttpResponse> {
    let dto = body.into_inner();
    validate_post_fields(&dto.title, &dto.content)?;

    let req = UpdatePostRequest {
        title: dto.title,
        content: dto.content,
        category_id: dto.category_id,
        tag_ids: dto.tag_ids,
        status: parse_status(&dto.status)?,
    };

    let post = state.posts.update_post(path.into_inner(), req).await?;

    Ok(HttpResponse::Ok().json(to_post_dto(post)))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.posts.delete_post(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

fn validate_post_fields(title: &str, content: &str) -> Result<(), ApiError> {
    use quill_shared::FieldError;

    let mut errors = Vec::new();
    if title.trim().is_empty() {
        errors.push(FieldError {
            field: "title".to_string(),
            message: "Title must not be blank".to_string(),
        });
    }
    if content.trim().is_empty() {
        errors.push(FieldError {
            field: "content".to_string(),
            message: "Content must not be blank".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}
