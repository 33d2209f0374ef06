//! Domain entities - the core business objects.

mod category;
mod post;
mod tag;
mod user;

pub use category::{Category, CategoryWithPostCount};
pub use post::{CreatePostRequest, Post, PostStatus, UpdatePostRequest, reading_time};
pub use tag::{Tag, TagWithPostCount};
pub use user::{Author, User};
