// tests/common/mod.rs

#![allow(dead_code)]

use std::fs;

use teacher_assistant::{
    config::Config,
    models::teacher::TeacherRecord,
    routes,
    state::AppState,
    store::{RecordStore, TableKind},
};
use tempfile::TempDir;

pub const ROSTER: &str = "\
Teacher_ID,Teacher_Name,Subject,Block,Room_Number,Cabin_Number,Lecture_Start,Lecture_End,Free_Start,Free_End,Available_Days
7,Dr. X,Physics,A,101,C1,09:00,10:00,10:00,11:00,\"Mon,Wed\"
12,Prof. Ada Lovelace,Math,B,204,C7,11:00,12:00,14:00,15:30,Tue
";

/// A running app plus the data directory it writes into.
pub struct TestApp {
    pub address: String,
    pub store: RecordStore,
    _data_dir: TempDir,
}

/// Question bank where the correct answer is always option B.
pub fn question_bank(n: usize) -> String {
    let mut csv = TableKind::QuizQuestions.header().join(",");
    csv.push('\n');
    for i in 0..n {
        csv.push_str(&format!("Question {i},A{i},B{i},C{i},D{i},B\n"));
    }
    csv
}

/// Spawns the app on a random port over a fresh data directory holding
/// the sample roster and `questions` quiz questions.
pub async fn spawn_app(questions: usize) -> TestApp {
    let data_dir = TempDir::new().expect("Failed to create temp data dir");

    let seed = RecordStore::new(data_dir.path());
    seed.replace::<TeacherRecord>(ROSTER.as_bytes())
        .expect("Failed to seed roster");
    fs::write(seed.path(TableKind::QuizQuestions), question_bank(questions))
        .expect("Failed to seed questions");

    let config = Config::with_data_dir(data_dir.path());
    let state = AppState::new(config);
    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address,
        store: RecordStore::new(data_dir.path()),
        _data_dir: data_dir,
    }
}
