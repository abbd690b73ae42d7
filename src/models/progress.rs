// src/models/progress.rs

use serde::Serialize;
use utoipa::ToSchema;

/// Where a student stands among everyone who has taken a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Rank {
    Ranked { position: usize, out_of: usize },
    Unranked,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Summary {
    pub total_quizzes: usize,
    /// Mean score rounded to two decimals, 0 without attempts.
    pub avg_score: f64,
    pub total_thoughts: usize,
    pub rank: Rank,
    pub correct_total: u64,
    pub wrong_total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum ActivityKind {
    Quiz,
    Thought,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TimelineEntry {
    pub timestamp: String,
    pub kind: ActivityKind,
    pub detail: String,
}

/// One point of the scores-over-time chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ScorePoint {
    pub taken_at: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProgressOverview {
    pub student_id: String,
    pub summary: Summary,
    /// Most recent first.
    pub timeline: Vec<TimelineEntry>,
    /// Oldest first.
    pub score_history: Vec<ScorePoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ReportHeader {
    pub student_name: String,
    pub student_id: String,
    pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
}

/// Data behind the two report charts. A chart is omitted when it has nothing to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ReportCharts {
    pub scores_over_time: Option<Vec<ScorePoint>>,
    pub correct_vs_wrong: Option<CorrectVsWrong>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CorrectVsWrong {
    pub correct: u64,
    pub wrong: u64,
}

/// Document model handed to the report renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProgressReport {
    pub header: ReportHeader,
    pub summary: Vec<SummaryRow>,
    pub charts: ReportCharts,
    pub timeline: Vec<TimelineEntry>,
    pub file_name: String,
}
