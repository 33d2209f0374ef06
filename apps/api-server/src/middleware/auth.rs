//! Authentication extractor for protected routes.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;

use quill_core::services::UserIdentity;

use crate::middleware::error::ApiError;
use crate::state::AppState;

/// Authenticated user identity extractor.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.0.name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity(pub UserIdentity);

impl FromRequest for Identity {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| {
                    tracing::error!("AppState not found in app data");
                    ApiError::Internal("Server configuration error".to_string())
                })?;

            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .ok_or(ApiError::Unauthorized)?;

            let auth_str = auth_header.to_str().map_err(|_| ApiError::Unauthorized)?;

            let token = auth_str
                .strip_prefix("Bearer ")
                .ok_or(ApiError::Unauthorized)?;

            let identity = state.auth.validate_token(token).await?;
            Ok(Identity(identity))
        })
    }
}
