use std::sync::Arc;

use axum::extract::FromRef;

use crate::{config::Config, services::quiz_session::QuizSessions, store::RecordStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub quizzes: Arc<QuizSessions>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: Arc::new(RecordStore::new(config.data_dir.clone())),
            quizzes: Arc::new(QuizSessions::new(
                config.quiz_session_idle,
                config.quiz_session_capacity,
            )),
            config,
        }
    }
}

impl FromRef<AppState> for Arc<RecordStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<QuizSessions> {
    fn from_ref(state: &AppState) -> Self {
        state.quizzes.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
