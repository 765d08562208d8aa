pub mod auth;
pub mod casino;
pub mod market;
pub mod profile;

use crate::errors::AppError;

/// Any path no route claims.
pub async fn not_found() -> AppError {
    AppError::not_found("Not found")
}
