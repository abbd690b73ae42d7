// src/models/teacher.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::{Record, TableKind};

/// One row of the teacher roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TeacherRecord {
    #[serde(rename = "Teacher_ID")]
    pub id: String,
    #[serde(rename = "Teacher_Name")]
    pub name: String,
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Block")]
    pub block: String,
    #[serde(rename = "Room_Number")]
    pub room: String,
    #[serde(rename = "Cabin_Number")]
    pub cabin: String,
    #[serde(rename = "Lecture_Start")]
    pub lecture_start: String,
    #[serde(rename = "Lecture_End")]
    pub lecture_end: String,
    #[serde(rename = "Free_Start")]
    pub free_start: String,
    #[serde(rename = "Free_End")]
    pub free_end: String,
    /// Weekday tokens joined with commas, e.g. `Mon,Wed`.
    #[serde(rename = "Available_Days")]
    pub available_days: String,
}

impl TeacherRecord {
    /// Weekday tokens in stored order, blanks dropped.
    pub fn days(&self) -> Vec<&str> {
        self.available_days
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .collect()
    }
}

impl Record for TeacherRecord {
    const KIND: TableKind = TableKind::Teachers;

    fn check(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Teacher_ID is empty".to_string());
        }
        crate::services::availability::slots_for(self)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
