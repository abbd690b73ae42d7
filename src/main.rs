// src/main.rs

use dotenvy::dotenv;
use teacher_assistant::config::Config;
use teacher_assistant::models::teacher::TeacherRecord;
use teacher_assistant::routes;
use teacher_assistant::services::quiz_session::load_question_pool;
use teacher_assistant::state::AppState;
use teacher_assistant::store::{RecordStore, StoreError, TableKind};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let state = AppState::new(config.clone());
    prepare_tables(&state.store, &config)?;
    tracing::info!("Data directory: {}", state.store.data_dir().display());

    // Create the Axum application router
    let app = routes::create_router(state);

    tracing::info!("Listening on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    // Start the server
    axum::serve(listener, app).await?;
    Ok(())
}

/// Creates the append-only tables and reports on the reference data.
fn prepare_tables(store: &RecordStore, config: &Config) -> Result<(), StoreError> {
    for kind in [
        TableKind::Appointments,
        TableKind::Thoughts,
        TableKind::QuizResults,
    ] {
        store.ensure(kind)?;
    }

    match store.load::<TeacherRecord>() {
        Ok(roster) if roster.is_empty() => {
            tracing::warn!("Teacher roster is empty; upload one via PUT /api/admin/teachers")
        }
        Ok(roster) => tracing::info!("Loaded {} teachers", roster.len()),
        Err(e) => tracing::error!("Teacher roster is unusable: {}", e),
    }

    let pool = load_question_pool(store)?;
    if pool.len() < config.quiz_question_count {
        tracing::warn!(
            "Question bank holds {} questions; quizzes need {}",
            pool.len(),
            config.quiz_question_count
        );
    }
    Ok(())
}
