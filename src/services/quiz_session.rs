// src/services/quiz_session.rs

//! Per-student quiz attempts.
//!
//! A [`QuizSession`] is an explicit state machine:
//! `NotStarted -> InProgress -> Submitted -> (restart) -> NotStarted`.
//! Sessions live in [`QuizSessions`], keyed by an opaque token handed to the
//! client on start, so one student's attempt is never visible to another.
//! The registry is bounded: idle sessions expire and the least recently used
//! session is evicted once capacity is reached.

use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

use rand::{Rng, seq::SliceRandom};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    models::{
        question::QuizQuestion,
        quiz_result::{QuestionAnalysis, QuizOutcome, QuizResultRecord},
    },
    store::{Record, RecordStore, StoreError},
    utils::time::now_timestamp,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub enum QuizState {
    #[default]
    NotStarted,
    InProgress,
    Submitted,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("Quiz needs {required} questions but only {available} are available")]
    InsufficientQuestions { available: usize, required: usize },

    #[error("Cannot {action} a quiz that is {state:?}")]
    InvalidState { action: &'static str, state: QuizState },

    #[error("Question {index} is outside this quiz of {len} questions")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("Quiz session not found")]
    UnknownSession,
}

#[derive(Debug, Default)]
pub struct QuizSession {
    state: QuizState,
    questions: Vec<QuizQuestion>,
    answers: HashMap<usize, String>,
    /// Graded but not yet persisted. Answers are frozen meanwhile.
    pending_submit: bool,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &HashMap<usize, String> {
        &self.answers
    }

    /// Draws `n` distinct questions from `pool`, uniformly and without replacement.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        pool: &[QuizQuestion],
        n: usize,
        rng: &mut R,
    ) -> Result<(), QuizError> {
        if self.state != QuizState::NotStarted {
            return Err(QuizError::InvalidState {
                action: "start",
                state: self.state,
            });
        }
        if pool.len() < n {
            return Err(QuizError::InsufficientQuestions {
                available: pool.len(),
                required: n,
            });
        }

        self.questions = pool.choose_multiple(rng, n).cloned().collect();
        self.answers.clear();
        self.state = QuizState::InProgress;
        Ok(())
    }

    /// Records the chosen option for one question, replacing any earlier choice.
    pub fn answer(&mut self, index: usize, option: impl Into<String>) -> Result<(), QuizError> {
        if self.state != QuizState::InProgress || self.pending_submit {
            return Err(QuizError::InvalidState {
                action: "answer",
                state: self.state,
            });
        }
        if index >= self.questions.len() {
            return Err(QuizError::QuestionOutOfRange {
                index,
                len: self.questions.len(),
            });
        }
        self.answers.insert(index, option.into());
        Ok(())
    }

    /// Grades every drawn question and moves to `Submitted`.
    pub fn submit(&mut self) -> Result<QuizOutcome, QuizError> {
        let outcome = self.begin_submit()?;
        self.complete_submit()?;
        Ok(outcome)
    }

    /// Grades every drawn question without leaving `InProgress`.
    /// Unanswered questions count as wrong.
    ///
    /// The attempt stays pending until [`QuizSession::complete_submit`] or
    /// [`QuizSession::cancel_submit`]; a second submit meanwhile is refused.
    pub fn begin_submit(&mut self) -> Result<QuizOutcome, QuizError> {
        if self.state != QuizState::InProgress || self.pending_submit {
            return Err(QuizError::InvalidState {
                action: "submit",
                state: self.state,
            });
        }

        let analysis: Vec<QuestionAnalysis> = self
            .questions
            .iter()
            .enumerate()
            .map(|(index, q)| {
                let correct_answer = q.correct_answer().unwrap_or_default().to_string();
                let given_answer = self.answers.get(&index).cloned().unwrap_or_default();
                let is_correct = !given_answer.is_empty() && given_answer.trim() == correct_answer.trim();
                QuestionAnalysis {
                    index,
                    question: q.question.clone(),
                    given_answer,
                    correct_answer,
                    is_correct,
                }
            })
            .collect();

        let correct_count = analysis.iter().filter(|a| a.is_correct).count() as u32;
        let total_questions = analysis.len() as u32;

        self.pending_submit = true;
        Ok(QuizOutcome {
            correct_count,
            wrong_count: total_questions - correct_count,
            total_questions,
            analysis,
        })
    }

    /// Commits a pending submit once its result is stored.
    pub fn complete_submit(&mut self) -> Result<(), QuizError> {
        if self.state != QuizState::InProgress || !self.pending_submit {
            return Err(QuizError::InvalidState {
                action: "complete",
                state: self.state,
            });
        }
        self.pending_submit = false;
        self.state = QuizState::Submitted;
        Ok(())
    }

    /// Reopens the attempt after its result could not be stored.
    pub fn cancel_submit(&mut self) {
        self.pending_submit = false;
    }

    /// Discards the graded attempt so a new one can be started.
    pub fn restart(&mut self) -> Result<(), QuizError> {
        if self.state != QuizState::Submitted {
            return Err(QuizError::InvalidState {
                action: "restart",
                state: self.state,
            });
        }
        self.questions.clear();
        self.answers.clear();
        self.pending_submit = false;
        self.state = QuizState::NotStarted;
        Ok(())
    }
}

/// A session together with the student it belongs to.
#[derive(Debug)]
pub struct ActiveQuiz {
    pub student_name: String,
    pub student_id: String,
    pub session: QuizSession,
}

impl ActiveQuiz {
    pub fn result_record(&self, outcome: &QuizOutcome) -> QuizResultRecord {
        QuizResultRecord {
            name: self.student_name.clone(),
            student_id: self.student_id.clone(),
            taken_at: now_timestamp(),
            score: outcome.correct_count,
            total_questions: Some(outcome.total_questions),
        }
    }
}

#[derive(Debug)]
struct Slot {
    quiz: ActiveQuiz,
    last_used: Instant,
}

/// Registry of live sessions keyed by token.
#[derive(Debug)]
pub struct QuizSessions {
    inner: Mutex<HashMap<Uuid, Slot>>,
    idle_ttl: Duration,
    capacity: usize,
}

impl QuizSessions {
    /// `capacity` is clamped to at least one session.
    pub fn new(idle_ttl: Duration, capacity: usize) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            idle_ttl,
            capacity: capacity.max(1),
        }
    }

    /// Stores a session under a fresh token, making room first if needed.
    pub fn insert(&self, quiz: ActiveQuiz) -> Uuid {
        let token = Uuid::new_v4();
        let now = Instant::now();
        let mut sessions = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        let before = sessions.len();
        sessions.retain(|_, slot| now.duration_since(slot.last_used) < self.idle_ttl);
        let expired = before - sessions.len();
        if expired > 0 {
            tracing::debug!("Expired {} idle quiz sessions", expired);
        }

        while sessions.len() >= self.capacity {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, slot)| slot.last_used)
                .map(|(token, _)| *token);
            match oldest {
                Some(oldest) => {
                    sessions.remove(&oldest);
                    tracing::warn!("Quiz session capacity reached; evicted {}", oldest);
                }
                None => break,
            }
        }

        sessions.insert(
            token,
            Slot {
                quiz,
                last_used: now,
            },
        );
        token
    }

    /// Runs `f` against the session behind `token`.
    pub fn with_session<T>(
        &self,
        token: Uuid,
        f: impl FnOnce(&mut ActiveQuiz) -> Result<T, QuizError>,
    ) -> Result<T, QuizError> {
        let mut sessions = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = sessions.get_mut(&token).ok_or(QuizError::UnknownSession)?;
        if slot.last_used.elapsed() >= self.idle_ttl {
            sessions.remove(&token);
            return Err(QuizError::UnknownSession);
        }
        slot.last_used = Instant::now();
        f(&mut slot.quiz)
    }

    pub fn remove(&self, token: Uuid) -> Option<ActiveQuiz> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&token)
            .map(|slot| slot.quiz)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Loads the question bank, dropping questions whose answer key is not A-D.
pub fn load_question_pool(store: &RecordStore) -> Result<Vec<QuizQuestion>, StoreError> {
    Ok(store
        .load_or_empty::<QuizQuestion>()?
        .into_iter()
        .filter(|q| match q.check() {
            Ok(()) => true,
            Err(reason) => {
                tracing::warn!("Skipping quiz question '{}': {}", q.question, reason);
                false
            }
        })
        .collect())
}
