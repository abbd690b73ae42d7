// src/models/appointment.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    store::{Record, TableKind},
    utils::validation::not_blank,
};

/// Represents one row of the appointments table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AppointmentRecord {
    #[serde(rename = "Student_Name")]
    pub student_name: String,
    #[serde(rename = "Student_ID")]
    pub student_id: String,
    #[serde(rename = "Teacher_ID")]
    pub teacher_id: String,
    #[serde(rename = "Teacher_Name")]
    pub teacher_name: String,
    /// Day plus time range, e.g. `Mon 10:00-11:00`.
    #[serde(rename = "Slot")]
    pub slot: String,
    #[serde(rename = "Date")]
    pub booked_at: String,
}

impl Record for AppointmentRecord {
    const KIND: TableKind = TableKind::Appointments;
}

/// DTO for booking a slot.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BookingRequest {
    #[validate(custom(function = not_blank, message = "Student name is required."))]
    pub student_name: String,
    #[validate(custom(function = not_blank, message = "Student ID is required."))]
    pub student_id: String,
    #[validate(custom(function = not_blank, message = "Teacher ID is required."))]
    pub teacher_id: String,
    #[validate(custom(function = not_blank, message = "Slot is required."))]
    pub slot: String,
}

/// A suggestion to book the last teacher and slot again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Recommendation {
    pub teacher_name: String,
    pub slot: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentAppointmentsResponse {
    pub appointments: Vec<AppointmentRecord>,
    pub recommendation: Option<Recommendation>,
}
