// src/handlers/teachers.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppError,
    handlers::blocking,
    models::teacher::TeacherRecord,
    services::{availability::slots_for, directory},
    store::RecordStore,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Teacher id digits or part of a name.
    pub q: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SlotsResponse {
    pub teacher_id: String,
    pub teacher_name: String,
    pub slots: Vec<String>,
}

async fn load_teacher(store: Arc<RecordStore>, id: &str) -> Result<TeacherRecord, AppError> {
    let teachers = blocking(move || store.load_or_empty::<TeacherRecord>()).await?;
    directory::find_by_id(&teachers, id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Teacher {} not found", id)))
}

/// Searches the roster by id or name.
#[utoipa::path(
    get,
    path = "/api/teachers",
    params(SearchParams),
    responses((status = 200, description = "Matching teachers", body = Vec<TeacherRecord>))
)]
pub async fn search_teachers(
    State(store): State<Arc<RecordStore>>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let teachers = blocking(move || store.load_or_empty::<TeacherRecord>()).await?;
    let query = params.q.unwrap_or_default();

    // Without a query the whole roster is listed.
    let found: Vec<TeacherRecord> = if query.trim().is_empty() {
        teachers
    } else {
        directory::search(&teachers, &query).into_iter().cloned().collect()
    };

    Ok(Json(found))
}

/// Retrieves a single teacher.
#[utoipa::path(
    get,
    path = "/api/teachers/{id}",
    params(("id" = String, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher record", body = TeacherRecord),
        (status = 404, description = "Unknown teacher")
    )
)]
pub async fn get_teacher(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(load_teacher(store, &id).await?))
}

/// Lists the bookable slots of a teacher.
#[utoipa::path(
    get,
    path = "/api/teachers/{id}/slots",
    params(("id" = String, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Bookable slots", body = SlotsResponse),
        (status = 404, description = "Unknown teacher")
    )
)]
pub async fn list_slots(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let teacher = load_teacher(store, &id).await?;
    let slots = slots_for(&teacher)?;

    Ok(Json(SlotsResponse {
        teacher_id: teacher.id,
        teacher_name: teacher.name,
        slots,
    }))
}
