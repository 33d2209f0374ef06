//! # Quill Shared
//!
//! Wire types shared between the server and API clients: request/response
//! DTOs and the JSON error envelope.

pub mod dto;
pub mod response;

pub use dto::*;
pub use response::{ApiErrorResponse, FieldError};
