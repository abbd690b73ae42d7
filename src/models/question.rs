// src/models/question.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::{Record, TableKind};

/// Represents one row of the quiz question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuizQuestion {
    #[serde(rename = "Question")]
    pub question: String,
    #[serde(rename = "Option_A")]
    pub option_a: String,
    #[serde(rename = "Option_B")]
    pub option_b: String,
    #[serde(rename = "Option_C")]
    pub option_c: String,
    #[serde(rename = "Option_D")]
    pub option_d: String,
    /// Letter key (`A`..`D`) of the correct option.
    #[serde(rename = "Correct_Option")]
    pub correct_option: String,
}

impl QuizQuestion {
    pub fn options(&self) -> [&str; 4] {
        [&self.option_a, &self.option_b, &self.option_c, &self.option_d]
    }

    /// Text of the option named by `correct_option`, if the letter is valid.
    pub fn correct_answer(&self) -> Option<&str> {
        match self.correct_option.trim().to_ascii_uppercase().as_str() {
            "A" => Some(&self.option_a),
            "B" => Some(&self.option_b),
            "C" => Some(&self.option_c),
            "D" => Some(&self.option_d),
            _ => None,
        }
    }
}

impl Record for QuizQuestion {
    const KIND: TableKind = TableKind::QuizQuestions;

    fn check(&self) -> Result<(), String> {
        match self.correct_answer() {
            Some(_) => Ok(()),
            None => Err(format!(
                "Correct_Option '{}' is not one of A, B, C, D",
                self.correct_option
            )),
        }
    }
}

/// DTO for sending a question to the client (excludes the answer key).
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicQuestion {
    pub index: usize,
    pub question: String,
    pub options: Vec<String>,
}

impl PublicQuestion {
    pub fn from_question(index: usize, q: &QuizQuestion) -> Self {
        Self {
            index,
            question: q.question.clone(),
            options: q.options().iter().map(|o| o.to_string()).collect(),
        }
    }
}
