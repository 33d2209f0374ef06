//! Application services - the business operations exposed to the transport
//! layer. Each service owns its ports as `Arc<dyn Trait>` and surfaces every
//! failure as a typed [`DomainError`](crate::error::DomainError).

mod auth;
mod category;
mod post;
mod tag;

pub use auth::{AuthenticationService, UserIdentity};
pub use category::CategoryService;
pub use post::PostService;
pub use tag::TagService;
