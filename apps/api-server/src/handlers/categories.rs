//! Category handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_shared::{CategoryDto, CreateCategoryRequest, FieldError};

use crate::mappers::to_category_dto;
use crate::middleware::auth::Identity;
use crate::middleware::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /api/v1/categories
pub async fn list(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let categories = state.categories.list().await?;
    let body: Vec<CategoryDto> = categories.into_iter().map(to_category_dto).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/v1/categories
pub async fn create(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<CreateCategoryRequest>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation(vec![FieldError {
            field: "name".to_string(),
            message: "Name must not be blank".to_string(),
        }]));
    }

    let category = state.categories.create(name).await?;

    // A freshly created category has no posts yet.
    Ok(HttpResponse::Created().json(CategoryDto {
        id: category.id,
        name: category.name,
        post_count: 0,
    }))
}

/// DELETE /api/v1/categories/{id}
pub async fn delete(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.categories.delete(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
