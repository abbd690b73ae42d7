// src/models/mod.rs

pub mod analytics;
pub mod appointment;
pub mod feedback;
pub mod progress;
pub mod question;
pub mod quiz_result;
pub mod teacher;
