// src/services/booking.rs

use validator::Validate;

use crate::{
    models::{
        appointment::{AppointmentRecord, BookingRequest, Recommendation},
        teacher::TeacherRecord,
    },
    services::{
        availability::{SlotError, slots_for},
        directory::find_by_id,
    },
    store::{RecordStore, StoreError},
    utils::time::now_timestamp,
};

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("{0}")]
    Validation(String),

    #[error("Teacher {0} not found")]
    UnknownTeacher(String),

    #[error(transparent)]
    InvalidTeacher(#[from] SlotError),

    #[error("Slot '{slot}' is not offered by {teacher_name}")]
    SlotUnavailable { teacher_name: String, slot: String },

    #[error("Student {student_id} already holds '{slot}' with {teacher_name}")]
    AlreadyBooked {
        student_id: String,
        teacher_name: String,
        slot: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Books a slot with the teacher named in the request.
///
/// * Rejects blank fields and slots the teacher does not offer.
/// * Rejects a second booking of the same teacher and slot by the same student;
///   different students may share a slot.
/// * Stamps the row with the current local time and appends it.
pub fn book(store: &RecordStore, request: &BookingRequest) -> Result<AppointmentRecord, BookingError> {
    request
        .validate()
        .map_err(|e| BookingError::Validation(e.to_string()))?;

    let teachers = store.load_or_empty::<TeacherRecord>()?;
    let teacher = find_by_id(&teachers, &request.teacher_id)
        .ok_or_else(|| BookingError::UnknownTeacher(request.teacher_id.trim().to_string()))?;

    let slot = request.slot.trim();
    if !slots_for(teacher)?.iter().any(|s| s == slot) {
        return Err(BookingError::SlotUnavailable {
            teacher_name: teacher.name.clone(),
            slot: slot.to_string(),
        });
    }

    let student_id = request.student_id.trim();
    let duplicate = store
        .load_or_empty::<AppointmentRecord>()?
        .iter()
        .any(|a| a.student_id.trim() == student_id && a.teacher_id.trim() == teacher.id.trim() && a.slot == slot);
    if duplicate {
        return Err(BookingError::AlreadyBooked {
            student_id: student_id.to_string(),
            teacher_name: teacher.name.clone(),
            slot: slot.to_string(),
        });
    }

    let record = AppointmentRecord {
        student_name: request.student_name.trim().to_string(),
        student_id: student_id.to_string(),
        teacher_id: teacher.id.clone(),
        teacher_name: teacher.name.clone(),
        slot: slot.to_string(),
        booked_at: now_timestamp(),
    };
    store.append(&record)?;

    tracing::info!(
        "Booked {} with {} for student {}",
        record.slot,
        record.teacher_name,
        record.student_id
    );
    Ok(record)
}

/// All appointments of one student, in booking order.
pub fn appointments_for_student(
    store: &RecordStore,
    student_id: &str,
) -> Result<Vec<AppointmentRecord>, StoreError> {
    let student_id = student_id.trim();
    Ok(store
        .load_or_empty::<AppointmentRecord>()?
        .into_iter()
        .filter(|a| a.student_id.trim() == student_id)
        .collect())
}

/// Suggests the teacher and slot of the student's most recent booking.
pub fn recommend_next(appointments: &[AppointmentRecord]) -> Option<Recommendation> {
    appointments.last().map(|a| Recommendation {
        teacher_name: a.teacher_name.clone(),
        slot: a.slot.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{services::availability::tests::teacher, store::TableKind};
    use tempfile::TempDir;

    fn seeded_store(dir: &TempDir) -> RecordStore {
        let store = RecordStore::new(dir.path());
        let header = TableKind::Teachers.header().join(",");
        let roster = format!(
            "{}\n7,Dr. X,Physics,A,101,C1,09:00,10:00,10:00,11:00,\"Mon,Wed\"\n",
            header
        );
        store.replace::<TeacherRecord>(roster.as_bytes()).unwrap();
        store
    }

    fn request(name: &str, id: &str, slot: &str) -> BookingRequest {
        BookingRequest {
            student_name: name.to_string(),
            student_id: id.to_string(),
            teacher_id: "7".to_string(),
            slot: slot.to_string(),
        }
    }

    #[test]
    fn test_book_appends_exactly_one_row() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir);
        let before = appointments_for_student(&store, "001").unwrap().len();

        let record = book(&store, &request("S1", "001", "Mon 10:00-11:00")).unwrap();

        let after = appointments_for_student(&store, "001").unwrap();
        assert_eq!(after.len(), before + 1);
        let stored = after.last().unwrap();
        assert_eq!(stored, &record);
        assert_eq!(stored.student_name, "S1");
        assert_eq!(stored.teacher_id, "7");
        assert_eq!(stored.teacher_name, "Dr. X");
        assert_eq!(stored.slot, "Mon 10:00-11:00");
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        assert!(stored.booked_at.starts_with(&today));
    }

    #[test]
    fn test_book_requires_student_fields() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir);

        let err = book(&store, &request("", "001", "Mon 10:00-11:00")).unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
        let err = book(&store, &request("S1", "  ", "Mon 10:00-11:00")).unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
        assert!(store.load::<AppointmentRecord>().unwrap().is_empty());
    }

    #[test]
    fn test_book_rejects_unknown_teacher_and_slot() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir);

        let mut req = request("S1", "001", "Mon 10:00-11:00");
        req.teacher_id = "99".to_string();
        assert!(matches!(book(&store, &req), Err(BookingError::UnknownTeacher(_))));

        let err = book(&store, &request("S1", "001", "Fri 10:00-11:00")).unwrap_err();
        assert!(matches!(err, BookingError::SlotUnavailable { .. }));
    }

    #[test]
    fn test_same_student_cannot_double_book() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir);

        book(&store, &request("S1", "001", "Mon 10:00-11:00")).unwrap();
        let err = book(&store, &request("S1", "001", "Mon 10:00-11:00")).unwrap_err();
        assert!(matches!(err, BookingError::AlreadyBooked { .. }));

        // Another student may join the same slot.
        book(&store, &request("S2", "002", "Mon 10:00-11:00")).unwrap();
        assert_eq!(store.load::<AppointmentRecord>().unwrap().len(), 2);
    }

    #[test]
    fn test_recommend_next_uses_last_booking() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir);
        assert_eq!(recommend_next(&[]), None);

        book(&store, &request("S1", "001", "Mon 10:00-11:00")).unwrap();
        book(&store, &request("S1", "001", "Wed 10:00-11:00")).unwrap();

        let mine = appointments_for_student(&store, "001").unwrap();
        let rec = recommend_next(&mine).unwrap();
        assert_eq!(rec.teacher_name, "Dr. X");
        assert_eq!(rec.slot, "Wed 10:00-11:00");
    }

    #[test]
    fn test_teacher_helper_matches_roster() {
        // Keeps the shared fixture in step with the seeded roster row.
        let t = teacher("7", "Dr. X", "Mon,Wed");
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir);
        assert_eq!(store.load::<TeacherRecord>().unwrap(), vec![t]);
    }
}
