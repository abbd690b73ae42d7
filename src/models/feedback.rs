// src/models/feedback.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    store::{Record, TableKind},
    utils::validation::not_blank,
};

/// A student's thought about a teacher. Stored verbatim, never moderated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeedbackRecord {
    #[serde(rename = "Student_Name")]
    pub student_name: String,
    #[serde(rename = "Student_ID")]
    pub student_id: String,
    #[serde(rename = "Teacher_Name")]
    pub teacher_name: String,
    #[serde(rename = "Thought")]
    pub text: String,
    #[serde(rename = "Date")]
    pub submitted_at: String,
}

impl Record for FeedbackRecord {
    const KIND: TableKind = TableKind::Thoughts;
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SubmitThoughtRequest {
    #[validate(custom(function = not_blank, message = "Student name is required."))]
    pub student_name: String,
    #[validate(custom(function = not_blank, message = "Student ID is required."))]
    pub student_id: String,
    #[validate(custom(function = not_blank, message = "Teacher name is required."))]
    pub teacher_name: String,
    #[validate(custom(function = not_blank, message = "Thought cannot be empty."))]
    pub thought: String,
}
