// src/services/feedback.rs

use validator::Validate;

use crate::{
    models::feedback::{FeedbackRecord, SubmitThoughtRequest},
    store::{RecordStore, StoreError},
    utils::time::now_timestamp,
};

#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Records a thought. The text is stored exactly as given.
pub fn submit(store: &RecordStore, request: &SubmitThoughtRequest) -> Result<FeedbackRecord, FeedbackError> {
    request
        .validate()
        .map_err(|e| FeedbackError::Validation(e.to_string()))?;

    let record = FeedbackRecord {
        student_name: request.student_name.trim().to_string(),
        student_id: request.student_id.trim().to_string(),
        teacher_name: request.teacher_name.trim().to_string(),
        text: request.thought.clone(),
        submitted_at: now_timestamp(),
    };
    store.append(&record)?;

    tracing::info!("Thought from student {} about {}", record.student_id, record.teacher_name);
    Ok(record)
}

/// The last `limit` thoughts, oldest first.
pub fn recent(store: &RecordStore, limit: usize) -> Result<Vec<FeedbackRecord>, StoreError> {
    let all = store.load_or_empty::<FeedbackRecord>()?;
    Ok(tail(all, limit))
}

pub(crate) fn tail<T>(mut rows: Vec<T>, limit: usize) -> Vec<T> {
    let skip = rows.len().saturating_sub(limit);
    rows.drain(..skip);
    rows
}
