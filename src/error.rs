// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::{
    services::{
        availability::SlotError, booking::BookingError, feedback::FeedbackError,
        quiz_session::QuizError,
    },
    store::StoreError,
};

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (e.g., slot already held, quiz in the wrong state)
    Conflict(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Upload problems are the caller's fault; everything else is ours.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmptyUpload(_)
            | StoreError::SchemaMismatch { .. }
            | StoreError::InvalidRow { .. } => AppError::BadRequest(err.to_string()),
            StoreError::Io(_) | StoreError::Csv(_) => AppError::InternalServerError(err.to_string()),
        }
    }
}

impl From<SlotError> for AppError {
    fn from(err: SlotError) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Validation(msg) => AppError::BadRequest(msg),
            BookingError::UnknownTeacher(_) => AppError::NotFound(err.to_string()),
            BookingError::SlotUnavailable { .. } => AppError::BadRequest(err.to_string()),
            BookingError::AlreadyBooked { .. } => AppError::Conflict(err.to_string()),
            BookingError::InvalidTeacher(e) => e.into(),
            BookingError::Store(e) => e.into(),
        }
    }
}

impl From<FeedbackError> for AppError {
    fn from(err: FeedbackError) -> Self {
        match err {
            FeedbackError::Validation(msg) => AppError::BadRequest(msg),
            FeedbackError::Store(e) => e.into(),
        }
    }
}

impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::InsufficientQuestions { .. } => AppError::InternalServerError(err.to_string()),
            QuizError::InvalidState { .. } => AppError::Conflict(err.to_string()),
            QuizError::QuestionOutOfRange { .. } => AppError::BadRequest(err.to_string()),
            QuizError::UnknownSession => AppError::NotFound(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
