// src/handlers/thoughts.rs

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    config::RECENT_THOUGHTS_LIMIT,
    error::AppError,
    handlers::blocking,
    models::feedback::{FeedbackRecord, SubmitThoughtRequest},
    services::feedback,
    store::RecordStore,
};

/// Shares a thought about a teacher.
#[utoipa::path(
    post,
    path = "/api/thoughts",
    request_body = SubmitThoughtRequest,
    responses(
        (status = 201, description = "Thought stored", body = FeedbackRecord),
        (status = 400, description = "A field is empty")
    )
)]
pub async fn submit_thought(
    State(store): State<Arc<RecordStore>>,
    Json(req): Json<SubmitThoughtRequest>,
) -> Result<impl IntoResponse, AppError> {
    let record = blocking(move || feedback::submit(&store, &req)).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// The most recent thoughts, oldest first.
#[utoipa::path(
    get,
    path = "/api/thoughts/recent",
    responses((status = 200, description = "Recent thoughts", body = Vec<FeedbackRecord>))
)]
pub async fn recent_thoughts(
    State(store): State<Arc<RecordStore>>,
) -> Result<impl IntoResponse, AppError> {
    let recent = blocking(move || feedback::recent(&store, RECENT_THOUGHTS_LIMIT)).await?;
    Ok(Json(recent))
}
