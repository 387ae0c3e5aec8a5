//! HTTP handlers.

pub mod feed;
pub mod invalidate;
pub mod locations;
pub mod map;
pub mod ops;

use crate::error::AppError;

/// Fallback for routes that exist but not with the request's method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
