// src/handlers/docs.rs

use axum::{Json, response::IntoResponse};
use utoipa::OpenApi;

use crate::{
    handlers::{admin, appointments, progress, quiz, stats, teachers, thoughts},
    models::{
        analytics::{
            AdminAnalytics, AppointmentAnalytics, CountEntry, QuickStats, RosterStats, ThoughtStats,
        },
        appointment::{AppointmentRecord, BookingRequest, Recommendation, StudentAppointmentsResponse},
        feedback::{FeedbackRecord, SubmitThoughtRequest},
        progress::{
            ActivityKind, CorrectVsWrong, ProgressOverview, ProgressReport, Rank, ReportCharts,
            ReportHeader, ScorePoint, Summary, SummaryRow, TimelineEntry,
        },
        question::PublicQuestion,
        quiz_result::{
            AnswerRequest, QuestionAnalysis, QuizOutcome, QuizResultRecord, QuizSessionResponse,
            StartQuizRequest, SubmitQuizResponse,
        },
        teacher::TeacherRecord,
    },
    services::quiz_session::QuizState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        stats::quick_stats,
        teachers::search_teachers,
        teachers::get_teacher,
        teachers::list_slots,
        appointments::book_appointment,
        appointments::list_student_appointments,
        thoughts::submit_thought,
        thoughts::recent_thoughts,
        quiz::start_quiz,
        quiz::answer_question,
        quiz::submit_quiz,
        quiz::restart_quiz,
        quiz::discard_quiz,
        progress::get_progress,
        progress::get_report,
        admin::upload_roster,
        admin::download_roster,
        admin::clear_appointments,
        admin::clear_thoughts,
        admin::get_analytics,
    ),
    components(schemas(
        TeacherRecord,
        teachers::SlotsResponse,
        AppointmentRecord,
        BookingRequest,
        Recommendation,
        StudentAppointmentsResponse,
        FeedbackRecord,
        SubmitThoughtRequest,
        PublicQuestion,
        QuizState,
        QuizResultRecord,
        StartQuizRequest,
        QuizSessionResponse,
        AnswerRequest,
        QuestionAnalysis,
        QuizOutcome,
        SubmitQuizResponse,
        Rank,
        Summary,
        ActivityKind,
        TimelineEntry,
        ScorePoint,
        ProgressOverview,
        ReportHeader,
        SummaryRow,
        ReportCharts,
        CorrectVsWrong,
        ProgressReport,
        CountEntry,
        QuickStats,
        RosterStats,
        AppointmentAnalytics,
        ThoughtStats,
        AdminAnalytics,
    )),
    tags((name = "teacher-assistant", description = "Appointments, thoughts, quizzes and progress reports"))
)]
pub struct ApiDoc;

/// Serves the OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
