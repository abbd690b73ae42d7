// src/handlers/mod.rs

pub mod admin;
pub mod appointments;
pub mod docs;
pub mod progress;
pub mod quiz;
pub mod stats;
pub mod teachers;
pub mod thoughts;

use crate::error::AppError;

/// Runs file-backed store work on the blocking thread pool.
pub(crate) async fn blocking<T, E, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<AppError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Blocking task failed: {}", e)))?
        .map_err(Into::into)
}
