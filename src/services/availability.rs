// src/services/availability.rs

use chrono::NaiveTime;

use crate::models::teacher::TeacherRecord;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SlotError {
    #[error("Teacher {teacher_id} has an invalid record: {reason}")]
    InvalidTeacherRecord { teacher_id: String, reason: String },
}

fn parse_clock(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

/// Lists the bookable slots of a teacher, one per available day, in stored day order.
///
/// Each slot reads `"{day} {free_start}-{free_end}"`. Existing bookings are not consulted.
pub fn slots_for(teacher: &TeacherRecord) -> Result<Vec<String>, SlotError> {
    let invalid = |reason: String| SlotError::InvalidTeacherRecord {
        teacher_id: teacher.id.clone(),
        reason,
    };

    let days = teacher.days();
    if days.is_empty() {
        return Err(invalid("no available days".to_string()));
    }

    let start = parse_clock(&teacher.free_start)
        .ok_or_else(|| invalid(format!("malformed Free_Start '{}'", teacher.free_start)))?;
    let end = parse_clock(&teacher.free_end)
        .ok_or_else(|| invalid(format!("malformed Free_End '{}'", teacher.free_end)))?;
    if start > end {
        return Err(invalid(format!(
            "Free_Start {} is after Free_End {}",
            teacher.free_start, teacher.free_end
        )));
    }

    let window = format!("{}-{}", teacher.free_start.trim(), teacher.free_end.trim());
    Ok(days
        .into_iter()
        .map(|day| format!("{} {}", day, window))
        .collect())
}
