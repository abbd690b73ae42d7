// src/handlers/progress.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppError,
    handlers::blocking,
    models::progress::{ProgressOverview, ProgressReport},
    services::progress,
    store::RecordStore,
    utils::time::now_timestamp,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReportParams {
    /// Student name printed in the report header.
    pub name: Option<String>,
}

/// Summary statistics, activity timeline and chart series for one student.
#[utoipa::path(
    get,
    path = "/api/progress/{student_id}",
    params(("student_id" = String, Path, description = "Student ID")),
    responses((status = 200, description = "Progress overview", body = ProgressOverview))
)]
pub async fn get_progress(
    State(store): State<Arc<RecordStore>>,
    Path(student_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let overview = blocking(move || progress::summarize(&store, &student_id)).await?;
    Ok(Json(overview))
}

/// Document model of the downloadable progress report.
#[utoipa::path(
    get,
    path = "/api/progress/{student_id}/report",
    params(
        ("student_id" = String, Path, description = "Student ID"),
        ReportParams
    ),
    responses(
        (status = 200, description = "Report document", body = ProgressReport),
        (status = 400, description = "Missing student name")
    )
)]
pub async fn get_report(
    State(store): State<Arc<RecordStore>>,
    Path(student_id): Path<String>,
    Query(params): Query<ReportParams>,
) -> Result<impl IntoResponse, AppError> {
    let name = params.name.unwrap_or_default();
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("Student name is required.".to_string()));
    }

    let overview = blocking(move || progress::summarize(&store, &student_id)).await?;
    Ok(Json(progress::report(&overview, &name, &now_timestamp())))
}
