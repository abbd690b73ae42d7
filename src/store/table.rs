// src/store/table.rs

use serde::{Serialize, de::DeserializeOwned};

/// The tables kept under the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Teachers,
    Appointments,
    Thoughts,
    QuizQuestions,
    QuizResults,
}

impl TableKind {
    pub const ALL: [TableKind; 5] = [
        TableKind::Teachers,
        TableKind::Appointments,
        TableKind::Thoughts,
        TableKind::QuizQuestions,
        TableKind::QuizResults,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            TableKind::Teachers => "teacher_dataset.csv",
            TableKind::Appointments => "appointments.csv",
            TableKind::Thoughts => "student_thoughts.csv",
            TableKind::QuizQuestions => "quiz_questions_dataset.csv",
            TableKind::QuizResults => "quiz_results.csv",
        }
    }

    /// Canonical header row, in persisted column order.
    pub fn header(self) -> &'static [&'static str] {
        match self {
            TableKind::Teachers => &[
                "Teacher_ID",
                "Teacher_Name",
                "Subject",
                "Block",
                "Room_Number",
                "Cabin_Number",
                "Lecture_Start",
                "Lecture_End",
                "Free_Start",
                "Free_End",
                "Available_Days",
            ],
            TableKind::Appointments => &[
                "Student_Name",
                "Student_ID",
                "Teacher_ID",
                "Teacher_Name",
                "Slot",
                "Date",
            ],
            TableKind::Thoughts => &[
                "Student_Name",
                "Student_ID",
                "Teacher_Name",
                "Thought",
                "Date",
            ],
            TableKind::QuizQuestions => &[
                "Question",
                "Option_A",
                "Option_B",
                "Option_C",
                "Option_D",
                "Correct_Option",
            ],
            TableKind::QuizResults => &["Name", "Student_ID", "DateTime", "Score", "Total_Questions"],
        }
    }

    /// Columns a table must carry to be loaded. `Total_Questions` is optional
    /// because older result tables predate it.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            TableKind::QuizResults => &["Name", "Student_ID", "DateTime", "Score"],
            other => other.header(),
        }
    }
}

/// A typed row of one table.
pub trait Record: Serialize + DeserializeOwned {
    const KIND: TableKind;

    /// Invariants beyond what deserialization enforces. Checked on bulk replacement.
    fn check(&self) -> Result<(), String> {
        Ok(())
    }
}
