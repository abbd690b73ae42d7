// src/services/directory.rs

use regex::RegexBuilder;

use crate::models::teacher::TeacherRecord;

/// Searches the roster.
///
/// An all-digit query matches teacher ids containing it; anything else matches
/// names containing it, ignoring case. A blank query matches nothing.
pub fn search<'a>(teachers: &'a [TeacherRecord], query: &str) -> Vec<&'a TeacherRecord> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    if query.chars().all(|c| c.is_ascii_digit()) {
        return teachers
            .iter()
            .filter(|t| t.id.trim().contains(query))
            .collect();
    }

    let pattern = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(e) => {
            tracing::warn!("Could not build search pattern for '{}': {}", query, e);
            return Vec::new();
        }
    };

    teachers.iter().filter(|t| pattern.is_match(&t.name)).collect()
}

pub fn find_by_id<'a>(teachers: &'a [TeacherRecord], id: &str) -> Option<&'a TeacherRecord> {
    let id = id.trim();
    teachers.iter().find(|t| t.id.trim() == id)
}
