// src/handlers/admin.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    handlers::blocking,
    models::{analytics::AdminAnalytics, teacher::TeacherRecord},
    services::analytics,
    store::{RecordStore, TableKind},
};

const ROSTER_DOWNLOAD_NAME: &str = "teacher_dataset_backup.csv";

/// Replaces the whole teacher roster with an uploaded CSV.
///
/// * Rejects empty uploads.
/// * Rejects uploads missing a roster column or holding an invalid row.
#[utoipa::path(
    put,
    path = "/api/admin/teachers",
    request_body(content = String, content_type = "text/csv", description = "Roster CSV with header row"),
    responses(
        (status = 200, description = "Roster replaced"),
        (status = 400, description = "Empty or malformed upload")
    )
)]
pub async fn upload_roster(
    State(store): State<Arc<RecordStore>>,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    if body.trim().is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty!".to_string()));
    }

    let rows = blocking(move || store.replace::<TeacherRecord>(body.as_bytes())).await?;

    Ok(Json(serde_json::json!({
        "rows": rows,
        "message": "Teacher dataset updated successfully!"
    })))
}

/// Downloads the current roster as CSV.
#[utoipa::path(
    get,
    path = "/api/admin/teachers/download",
    responses(
        (status = 200, description = "Roster CSV", content_type = "text/csv", body = String),
        (status = 404, description = "No roster uploaded yet")
    )
)]
pub async fn download_roster(
    State(store): State<Arc<RecordStore>>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = blocking(move || store.raw(TableKind::Teachers))
        .await?
        .ok_or_else(|| AppError::NotFound("No teacher dataset found".to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", ROSTER_DOWNLOAD_NAME),
            ),
        ],
        bytes,
    ))
}

/// Deletes every appointment. Irreversible.
#[utoipa::path(
    delete,
    path = "/api/admin/appointments",
    responses((status = 204, description = "All appointments deleted"))
)]
pub async fn clear_appointments(
    State(store): State<Arc<RecordStore>>,
) -> Result<impl IntoResponse, AppError> {
    blocking(move || store.clear(TableKind::Appointments)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deletes every thought. Irreversible.
#[utoipa::path(
    delete,
    path = "/api/admin/thoughts",
    responses((status = 204, description = "All thoughts deleted"))
)]
pub async fn clear_thoughts(
    State(store): State<Arc<RecordStore>>,
) -> Result<impl IntoResponse, AppError> {
    blocking(move || store.clear(TableKind::Thoughts)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Roster statistics, appointment trends and recent thoughts.
#[utoipa::path(
    get,
    path = "/api/admin/analytics",
    responses((status = 200, description = "Dashboard data", body = AdminAnalytics))
)]
pub async fn get_analytics(
    State(store): State<Arc<RecordStore>>,
) -> Result<impl IntoResponse, AppError> {
    let (teachers, appointments, thoughts) =
        blocking(move || analytics::load_dashboard_tables(&store)).await?;
    Ok(Json(analytics::admin_analytics(&teachers, &appointments, &thoughts)))
}
