// src/services/mod.rs

pub mod analytics;
pub mod availability;
pub mod booking;
pub mod directory;
pub mod feedback;
pub mod progress;
pub mod quiz_session;
