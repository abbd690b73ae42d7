// src/handlers/appointments.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    handlers::blocking,
    models::appointment::{AppointmentRecord, BookingRequest, StudentAppointmentsResponse},
    services::booking,
    store::RecordStore,
};

/// Books a slot with a teacher.
///
/// * Validates student fields and that the slot is offered.
/// * Rejects the same student booking the same teacher and slot twice.
#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = BookingRequest,
    responses(
        (status = 201, description = "Appointment booked", body = AppointmentRecord),
        (status = 400, description = "Missing fields or slot not offered"),
        (status = 404, description = "Unknown teacher"),
        (status = 409, description = "Student already holds this slot")
    )
)]
pub async fn book_appointment(
    State(store): State<Arc<RecordStore>>,
    Json(req): Json<BookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let record = blocking(move || booking::book(&store, &req)).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Lists one student's appointments with a suggestion for the next booking.
#[utoipa::path(
    get,
    path = "/api/appointments/student/{student_id}",
    params(("student_id" = String, Path, description = "Student ID")),
    responses((status = 200, description = "Appointments in booking order", body = StudentAppointmentsResponse))
)]
pub async fn list_student_appointments(
    State(store): State<Arc<RecordStore>>,
    Path(student_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let appointments =
        blocking(move || booking::appointments_for_student(&store, &student_id)).await?;
    let recommendation = booking::recommend_next(&appointments);

    Ok(Json(StudentAppointmentsResponse {
        appointments,
        recommendation,
    }))
}
