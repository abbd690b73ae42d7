// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    handlers::blocking,
    models::{
        question::PublicQuestion,
        quiz_result::{
            AnswerRequest, QuizSessionResponse, StartQuizRequest, SubmitQuizResponse,
        },
    },
    services::quiz_session::{ActiveQuiz, QuizSession, QuizSessions, load_question_pool},
    store::RecordStore,
};

fn public_questions(session: &QuizSession) -> Vec<PublicQuestion> {
    session
        .questions()
        .iter()
        .enumerate()
        .map(|(i, q)| PublicQuestion::from_question(i, q))
        .collect()
}

/// Starts a quiz attempt.
///
/// Draws the configured number of questions at random and returns them
/// without answer keys, together with the session token for later calls.
#[utoipa::path(
    post,
    path = "/api/quiz/sessions",
    request_body = StartQuizRequest,
    responses(
        (status = 201, description = "Quiz started", body = QuizSessionResponse),
        (status = 400, description = "Missing name or ID"),
        (status = 500, description = "Question bank too small")
    )
)]
pub async fn start_quiz(
    State(store): State<Arc<RecordStore>>,
    State(quizzes): State<Arc<QuizSessions>>,
    State(config): State<Config>,
    Json(req): Json<StartQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = req.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let pool = blocking(move || load_question_pool(&store)).await?;
    let mut session = QuizSession::new();
    session.start(&pool, config.quiz_question_count, &mut rand::thread_rng())?;

    let questions = public_questions(&session);
    let state = session.state();
    let session_token = quizzes.insert(ActiveQuiz {
        student_name: req.student_name.trim().to_string(),
        student_id: req.student_id.trim().to_string(),
        session,
    });
    tracing::info!("Quiz {} started for student {}", session_token, req.student_id.trim());

    Ok((
        StatusCode::CREATED,
        Json(QuizSessionResponse {
            session_token,
            state,
            questions,
        }),
    ))
}

/// Records the chosen option for one question. Re-answering replaces the choice.
#[utoipa::path(
    put,
    path = "/api/quiz/sessions/{token}/answers",
    params(("token" = Uuid, Path, description = "Quiz session token")),
    request_body = AnswerRequest,
    responses(
        (status = 204, description = "Answer recorded"),
        (status = 400, description = "Question index out of range"),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "Quiz is not in progress")
    )
)]
pub async fn answer_question(
    State(quizzes): State<Arc<QuizSessions>>,
    Path(token): Path<Uuid>,
    Json(req): Json<AnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    quizzes.with_session(token, |quiz| quiz.session.answer(req.index, req.option))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Grades the attempt and appends the result to the results table.
///
/// Unanswered questions count as wrong. The session only becomes submitted
/// once the result is stored; if storing fails the attempt can be submitted again.
#[utoipa::path(
    post,
    path = "/api/quiz/sessions/{token}/submit",
    params(("token" = Uuid, Path, description = "Quiz session token")),
    responses(
        (status = 200, description = "Graded attempt", body = SubmitQuizResponse),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "Quiz is not in progress")
    )
)]
pub async fn submit_quiz(
    State(store): State<Arc<RecordStore>>,
    State(quizzes): State<Arc<QuizSessions>>,
    Path(token): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (result, outcome) = quizzes.with_session(token, |quiz| {
        let outcome = quiz.session.begin_submit()?;
        Ok((quiz.result_record(&outcome), outcome))
    })?;

    let row = result.clone();
    if let Err(e) = blocking(move || store.append(&row)).await {
        tracing::error!("Failed to save quiz result for {}: {:?}", result.student_id, e);
        // The session may have expired meanwhile; nothing to reopen then.
        let _ = quizzes.with_session(token, |quiz| {
            quiz.session.cancel_submit();
            Ok(())
        });
        return Err(e);
    }

    if let Err(e) = quizzes.with_session(token, |quiz| quiz.session.complete_submit()) {
        tracing::warn!("Quiz {} result saved but session not closed: {}", token, e);
    }

    Ok(Json(SubmitQuizResponse {
        message: format!(
            "{}, you got {} correct and {} wrong out of {}.",
            result.name, outcome.correct_count, outcome.wrong_count, outcome.total_questions
        ),
        result,
        outcome,
    }))
}

/// Discards a graded attempt and draws a fresh set of questions under the same token.
#[utoipa::path(
    post,
    path = "/api/quiz/sessions/{token}/restart",
    params(("token" = Uuid, Path, description = "Quiz session token")),
    responses(
        (status = 200, description = "New attempt started", body = QuizSessionResponse),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "Quiz has not been submitted")
    )
)]
pub async fn restart_quiz(
    State(store): State<Arc<RecordStore>>,
    State(quizzes): State<Arc<QuizSessions>>,
    State(config): State<Config>,
    Path(token): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let pool = blocking(move || load_question_pool(&store)).await?;

    let (state, questions) = quizzes.with_session(token, |quiz| {
        quiz.session.restart()?;
        quiz.session
            .start(&pool, config.quiz_question_count, &mut rand::thread_rng())?;
        Ok((quiz.session.state(), public_questions(&quiz.session)))
    })?;

    Ok(Json(QuizSessionResponse {
        session_token: token,
        state,
        questions,
    }))
}

/// Drops a session.
#[utoipa::path(
    delete,
    path = "/api/quiz/sessions/{token}",
    params(("token" = Uuid, Path, description = "Quiz session token")),
    responses(
        (status = 204, description = "Session discarded"),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn discard_quiz(
    State(quizzes): State<Arc<QuizSessions>>,
    Path(token): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    quizzes
        .remove(token)
        .ok_or_else(|| AppError::NotFound("Quiz session not found".to_string()))?;
    Ok(StatusCode::NO_CONTENT)
}
