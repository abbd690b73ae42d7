// src/handlers/stats.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    error::AppError,
    handlers::blocking,
    models::analytics::QuickStats,
    services::analytics,
    store::RecordStore,
};

/// Landing page figures: totals, most booked teachers and the latest bookings.
#[utoipa::path(
    get,
    path = "/api/stats",
    responses((status = 200, description = "Quick stats", body = QuickStats))
)]
pub async fn quick_stats(State(store): State<Arc<RecordStore>>) -> Result<impl IntoResponse, AppError> {
    let (teachers, appointments, _) =
        blocking(move || analytics::load_dashboard_tables(&store)).await?;
    Ok(Json(analytics::quick_stats(&teachers, &appointments)))
}
