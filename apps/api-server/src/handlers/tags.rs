//! Tag handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_shared::{CreateTagsRequest, FieldError, TagDto};

use crate::mappers::{to_counted_tag_dto, to_tag_dto};
use crate::middleware::auth::Identity;
use crate::middleware::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /api/v1/tags
pub async fn list(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let tags = state.tags.list().await?;
    let body: Vec<TagDto> = tags.into_iter().map(to_counted_tag_dto).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/v1/tags
pub async fn create(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<CreateTagsRequest>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();
    if req.names.is_empty() || req.names.iter().any(|n| n.trim().is_empty()) {
        return Err(ApiError::Validation(vec![FieldError {
            field: "names".to_string(),
            message: "At least one non-blank tag name is required".to_string(),
        }]));
    }

    let tags = state.tags.create_many(req.names).await?;
    let body: Vec<TagDto> = tags.into_iter().map(to_tag_dto).collect();

    Ok(HttpResponse::Created().json(body))
}

/// DELETE /api/v1/tags/{id}
pub async fn delete(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.tags.delete(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
