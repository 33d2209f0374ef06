//! Authentication handlers.

use actix_web::{HttpResponse, web};

use quill_shared::{AuthResponse, FieldError, LoginRequest, RegisterRequest};

use crate::middleware::error::{ApiError, ApiResult};
use crate::state::AppState;

/// POST /api/v1/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();

    let mut errors = Vec::new();
    if req.name.trim().is_empty() {
        errors.push(FieldError {
            field: "name".to_string(),
            message: "Name must not be blank".to_string(),
        });
    }
    if req.email.is_empty() || !req.email.contains('@') {
        errors.push(FieldError {
            field: "email".to_string(),
            message: "Invalid email address".to_string(),
        });
    }
    if req.password.len() < 8 {
        errors.push(FieldError {
            field: "password".to_string(),
            message: "Password must be at least 8 characters".to_string(),
        });
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    state
        .auth
        .register(req.name.trim(), &req.email, &req.password)
        .await?;

    // Registration never returns a session; clients log in separately.
    Ok(HttpResponse::Accepted().finish())
}

/// POST /api/v1/auth
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();

    let identity = state.auth.authenticate(&req.email, &req.password).await?;
    let token = state.auth.generate_token(&identity)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        expires_in: state.auth.token_expires_in(),
    }))
}
