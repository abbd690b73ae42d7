// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, appointments, docs, progress, quiz, stats, teachers, thoughts},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (teachers, appointments, thoughts, quiz, progress, admin).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (record store, quiz sessions, config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let teacher_routes = Router::new()
        .route("/", get(teachers::search_teachers))
        .route("/{id}", get(teachers::get_teacher))
        .route("/{id}/slots", get(teachers::list_slots));

    let appointment_routes = Router::new()
        .route("/", post(appointments::book_appointment))
        .route(
            "/student/{student_id}",
            get(appointments::list_student_appointments),
        );

    let thought_routes = Router::new()
        .route("/", post(thoughts::submit_thought))
        .route("/recent", get(thoughts::recent_thoughts));

    let quiz_routes = Router::new()
        .route("/sessions", post(quiz::start_quiz))
        .route("/sessions/{token}", delete(quiz::discard_quiz))
        .route("/sessions/{token}/answers", put(quiz::answer_question))
        .route("/sessions/{token}/submit", post(quiz::submit_quiz))
        .route("/sessions/{token}/restart", post(quiz::restart_quiz));

    let progress_routes = Router::new()
        .route("/{student_id}", get(progress::get_progress))
        .route("/{student_id}/report", get(progress::get_report));

    let admin_routes = Router::new()
        .route("/teachers", put(admin::upload_roster))
        .route("/teachers/download", get(admin::download_roster))
        .route("/appointments", delete(admin::clear_appointments))
        .route("/thoughts", delete(admin::clear_thoughts))
        .route("/analytics", get(admin::get_analytics));

    Router::new()
        .route("/api/stats", get(stats::quick_stats))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .nest("/api/teachers", teacher_routes)
        .nest("/api/appointments", appointment_routes)
        .nest("/api/thoughts", thought_routes)
        .nest("/api/quiz", quiz_routes)
        .nest("/api/progress", progress_routes)
        .nest("/api/admin", admin_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
