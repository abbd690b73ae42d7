// src/services/analytics.rs

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::{
    config::{ADMIN_RECENT_LIMIT, RECENT_APPOINTMENTS_LIMIT, TOP_TEACHERS_LIMIT},
    models::{
        analytics::{
            AdminAnalytics, AppointmentAnalytics, CountEntry, QuickStats, RosterStats, ThoughtStats,
        },
        appointment::AppointmentRecord,
        feedback::FeedbackRecord,
        teacher::TeacherRecord,
    },
    services::feedback::tail,
    store::{RecordStore, StoreError},
    utils::time::parse_timestamp,
};

/// Counts labels, most frequent first. Equal counts keep first-appearance order.
fn value_counts<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<CountEntry> {
    let mut counts: Vec<CountEntry> = Vec::new();
    for label in labels {
        match counts.iter_mut().find(|c| c.label == label) {
            Some(entry) => entry.count += 1,
            None => counts.push(CountEntry {
                label: label.to_string(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

pub fn bookings_per_teacher(appointments: &[AppointmentRecord]) -> Vec<CountEntry> {
    value_counts(
        appointments
            .iter()
            .map(|a| a.teacher_name.trim())
            .filter(|name| !name.is_empty()),
    )
}

/// Bookings per subject, joining appointments to the roster on teacher id.
/// Appointments whose teacher is no longer on the roster are left out.
pub fn bookings_per_subject(
    teachers: &[TeacherRecord],
    appointments: &[AppointmentRecord],
) -> Vec<CountEntry> {
    let subjects: HashMap<&str, &str> = teachers
        .iter()
        .map(|t| (t.id.trim(), t.subject.as_str()))
        .collect();
    value_counts(
        appointments
            .iter()
            .filter_map(|a| subjects.get(a.teacher_id.trim()).copied()),
    )
}

/// Bookings per calendar day, oldest first. Rows with unreadable dates are skipped.
pub fn bookings_per_day(appointments: &[AppointmentRecord]) -> Vec<CountEntry> {
    let mut per_day = BTreeMap::new();
    for day in appointments
        .iter()
        .filter_map(|a| parse_timestamp(&a.booked_at))
        .map(|ts| ts.date())
    {
        *per_day.entry(day).or_insert(0usize) += 1;
    }
    per_day
        .into_iter()
        .map(|(day, count)| CountEntry {
            label: day.format("%Y-%m-%d").to_string(),
            count,
        })
        .collect()
}

pub fn quick_stats(teachers: &[TeacherRecord], appointments: &[AppointmentRecord]) -> QuickStats {
    let per_teacher = bookings_per_teacher(appointments);
    QuickStats {
        total_teachers: teachers.len(),
        total_appointments: appointments.len(),
        most_booked_teacher: per_teacher.first().map(|c| c.label.clone()),
        top_teachers: per_teacher.into_iter().take(TOP_TEACHERS_LIMIT).collect(),
        recent_appointments: tail(appointments.to_vec(), RECENT_APPOINTMENTS_LIMIT),
    }
}

pub fn admin_analytics(
    teachers: &[TeacherRecord],
    appointments: &[AppointmentRecord],
    thoughts: &[FeedbackRecord],
) -> AdminAnalytics {
    let unique_subjects: HashSet<&str> = teachers.iter().map(|t| t.subject.trim()).collect();

    AdminAnalytics {
        roster: RosterStats {
            total_teachers: teachers.len(),
            unique_subjects: unique_subjects.len(),
            total_free_slots: teachers
                .iter()
                .filter(|t| !t.free_start.trim().is_empty())
                .count(),
        },
        appointments: AppointmentAnalytics {
            total_appointments: appointments.len(),
            recent: tail(appointments.to_vec(), ADMIN_RECENT_LIMIT),
            per_day: bookings_per_day(appointments),
            per_teacher: bookings_per_teacher(appointments),
            per_subject: bookings_per_subject(teachers, appointments),
        },
        thoughts: ThoughtStats {
            total_thoughts: thoughts.len(),
            recent: tail(thoughts.to_vec(), ADMIN_RECENT_LIMIT),
        },
    }
}

/// Loads every table the dashboards need.
pub fn load_dashboard_tables(
    store: &RecordStore,
) -> Result<(Vec<TeacherRecord>, Vec<AppointmentRecord>, Vec<FeedbackRecord>), StoreError> {
    Ok((
        store.load_or_empty::<TeacherRecord>()?,
        store.load_or_empty::<AppointmentRecord>()?,
        store.load_or_empty::<FeedbackRecord>()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::availability::tests::teacher;

    fn appt(student: &str, teacher_id: &str, teacher_name: &str, at: &str) -> AppointmentRecord {
        AppointmentRecord {
            student_name: student.to_string(),
            student_id: student.to_string(),
            teacher_id: teacher_id.to_string(),
            teacher_name: teacher_name.to_string(),
            slot: "Mon 10:00-11:00".to_string(),
            booked_at: at.to_string(),
        }
    }

    fn roster() -> Vec<TeacherRecord> {
        let mut math = teacher("2", "Ms. Y", "Tue");
        math.subject = "Math".to_string();
        vec![teacher("1", "Dr. X", "Mon"), math, teacher("3", "Mr. Z", "Wed")]
    }

    fn bookings() -> Vec<AppointmentRecord> {
        vec![
            appt("s1", "2", "Ms. Y", "2024-01-01 09:00:00"),
            appt("s2", "1", "Dr. X", "2024-01-01 10:00:00"),
            appt("s3", "1", "Dr. X", "2024-01-02 10:00:00"),
            appt("s4", "3", "Mr. Z", "2024-01-03 10:00:00"),
            appt("s5", "2", "Ms. Y", "not a date"),
            appt("s6", "9", "Gone", "2024-01-03 11:00:00"),
        ]
    }

    #[test]
    fn test_quick_stats() {
        let stats = quick_stats(&roster(), &bookings());
        assert_eq!(stats.total_teachers, 3);
        assert_eq!(stats.total_appointments, 6);
        // Ms. Y and Dr. X tie on two bookings; Ms. Y was booked first.
        assert_eq!(stats.most_booked_teacher.as_deref(), Some("Ms. Y"));
        let top: Vec<&str> = stats.top_teachers.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(top, vec!["Ms. Y", "Dr. X", "Mr. Z"]);
        assert_eq!(stats.recent_appointments.len(), 5);
        assert_eq!(stats.recent_appointments[0].student_id, "s2");
    }

    #[test]
    fn test_quick_stats_without_bookings() {
        let stats = quick_stats(&roster(), &[]);
        assert_eq!(stats.most_booked_teacher, None);
        assert!(stats.top_teachers.is_empty());
    }

    #[test]
    fn test_bookings_per_day_skips_bad_dates() {
        let per_day = bookings_per_day(&bookings());
        assert_eq!(
            per_day,
            vec![
                CountEntry { label: "2024-01-01".to_string(), count: 2 },
                CountEntry { label: "2024-01-02".to_string(), count: 1 },
                CountEntry { label: "2024-01-03".to_string(), count: 2 },
            ]
        );
    }

    #[test]
    fn test_bookings_per_subject_joins_roster() {
        let per_subject = bookings_per_subject(&roster(), &bookings());
        assert_eq!(
            per_subject,
            vec![
                CountEntry { label: "Physics".to_string(), count: 3 },
                CountEntry { label: "Math".to_string(), count: 2 },
            ]
        );
    }

    #[test]
    fn test_admin_analytics() {
        let thoughts = vec![FeedbackRecord {
            student_name: "s1".to_string(),
            student_id: "s1".to_string(),
            teacher_name: "Dr. X".to_string(),
            text: "clear".to_string(),
            submitted_at: "2024-01-01 09:00:00".to_string(),
        }];
        let analytics = admin_analytics(&roster(), &bookings(), &thoughts);
        assert_eq!(analytics.roster.total_teachers, 3);
        assert_eq!(analytics.roster.unique_subjects, 2);
        assert_eq!(analytics.roster.total_free_slots, 3);
        assert_eq!(analytics.appointments.total_appointments, 6);
        assert_eq!(analytics.appointments.recent.len(), 6);
        assert_eq!(analytics.thoughts.total_thoughts, 1);
    }
}
