// src/models/analytics.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{appointment::AppointmentRecord, feedback::FeedbackRecord};

/// A label with how many times it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

/// Figures shown on the landing page.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuickStats {
    pub total_teachers: usize,
    pub total_appointments: usize,
    pub most_booked_teacher: Option<String>,
    pub top_teachers: Vec<CountEntry>,
    pub recent_appointments: Vec<AppointmentRecord>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RosterStats {
    pub total_teachers: usize,
    pub unique_subjects: usize,
    pub total_free_slots: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AppointmentAnalytics {
    pub total_appointments: usize,
    pub recent: Vec<AppointmentRecord>,
    /// Keyed by `YYYY-MM-DD`, ascending.
    pub per_day: Vec<CountEntry>,
    pub per_teacher: Vec<CountEntry>,
    pub per_subject: Vec<CountEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ThoughtStats {
    pub total_thoughts: usize,
    pub recent: Vec<FeedbackRecord>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminAnalytics {
    pub roster: RosterStats,
    pub appointments: AppointmentAnalytics,
    pub thoughts: ThoughtStats,
}
