// src/models/quiz_result.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::question::PublicQuestion,
    services::quiz_session::QuizState,
    store::{Record, TableKind},
    utils::validation::not_blank,
};

/// Represents one row of the quiz results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuizResultRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Student_ID")]
    pub student_id: String,
    #[serde(rename = "DateTime")]
    pub taken_at: String,
    /// Number of correct answers.
    #[serde(rename = "Score")]
    pub score: u32,
    /// Absent in tables written before the column existed.
    #[serde(rename = "Total_Questions", default)]
    pub total_questions: Option<u32>,
}

impl Record for QuizResultRecord {
    const KIND: TableKind = TableKind::QuizResults;
}

/// DTO for starting a quiz attempt.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StartQuizRequest {
    #[validate(custom(function = not_blank, message = "Student name is required."))]
    pub student_name: String,
    #[validate(custom(function = not_blank, message = "Student ID is required."))]
    pub student_id: String,
}

/// DTO for returning a freshly drawn quiz.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuizSessionResponse {
    pub session_token: Uuid,
    pub state: QuizState,
    pub questions: Vec<PublicQuestion>,
}

/// DTO for recording one answer.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnswerRequest {
    /// Zero-based position in the drawn question set.
    pub index: usize,
    /// Text of the chosen option.
    pub option: String,
}

/// Per-question grading detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct QuestionAnalysis {
    pub index: usize,
    pub question: String,
    /// Empty when the question was left unanswered.
    pub given_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Result of grading a submitted session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct QuizOutcome {
    pub correct_count: u32,
    pub wrong_count: u32,
    pub total_questions: u32,
    pub analysis: Vec<QuestionAnalysis>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitQuizResponse {
    pub message: String,
    pub result: QuizResultRecord,
    pub outcome: QuizOutcome,
}
