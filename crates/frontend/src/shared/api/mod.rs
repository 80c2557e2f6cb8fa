pub mod client;
pub mod error;
pub mod multipart;

pub use client::ApiClient;
pub use error::{ApiError, ApiErrorKind};
