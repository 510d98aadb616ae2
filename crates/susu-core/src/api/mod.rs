//! REST API surface: endpoint catalog, wire models, typed client, errors.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod types;

pub use client::{Page, SusuClient};
pub use error::{ApiError, ApiErrorKind, ApiResult};
