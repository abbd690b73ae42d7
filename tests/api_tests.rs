// tests/api_tests.rs

mod common;

use common::spawn_app;
use serde_json::{Value, json};
use teacher_assistant::{models::appointment::AppointmentRecord, store::TableKind};

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let app = spawn_app(10).await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn search_by_id_and_name() {
    let app = spawn_app(10).await;
    let client = reqwest::Client::new();

    let by_id: Vec<Value> = client
        .get(&format!("{}/api/teachers?q=12", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(by_id.len(), 1);
    assert_eq!(by_id[0]["Teacher_Name"], "Prof. Ada Lovelace");

    let by_name: Vec<Value> = client
        .get(&format!("{}/api/teachers?q=ada", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0]["Teacher_ID"], "12");

    let everyone: Vec<Value> = client
        .get(&format!("{}/api/teachers", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(everyone.len(), 2);
}

#[tokio::test]
async fn unknown_teacher_is_404() {
    let app = spawn_app(10).await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/teachers/999", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn slots_cover_days_and_free_window() {
    let app = spawn_app(10).await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/teachers/7/slots", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["teacher_name"], "Dr. X");
    assert_eq!(
        body["slots"],
        json!(["Mon 10:00-11:00", "Wed 10:00-11:00"])
    );
}

#[tokio::test]
async fn booking_flow() {
    let app = spawn_app(10).await;
    let client = reqwest::Client::new();

    let booking = json!({
        "student_name": "Asha",
        "student_id": "S1",
        "teacher_id": "7",
        "slot": "Mon 10:00-11:00"
    });

    // 1. First booking is created
    let response = client
        .post(&format!("{}/api/appointments", app.address))
        .json(&booking)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 201);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["Teacher_Name"], "Dr. X");

    // 2. Same student, same slot is rejected
    let response = client
        .post(&format!("{}/api/appointments", app.address))
        .json(&booking)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 409);

    // 3. Another student can share the slot
    let response = client
        .post(&format!("{}/api/appointments", app.address))
        .json(&json!({
            "student_name": "Ravi",
            "student_id": "S2",
            "teacher_id": "7",
            "slot": "Mon 10:00-11:00"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 201);

    // 4. The student's list carries a recommendation
    let response = client
        .get(&format!("{}/api/appointments/student/S1", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["appointments"].as_array().unwrap().len(), 1);
    assert_eq!(body["recommendation"]["teacher_name"], "Dr. X");
    assert_eq!(body["recommendation"]["slot"], "Mon 10:00-11:00");

    let stored = app.store.load::<AppointmentRecord>().unwrap();
    assert_eq!(stored.len(), 2);
}

#[tokio::test]
async fn booking_rejects_bad_input() {
    let app = spawn_app(10).await;
    let client = reqwest::Client::new();

    let cases = [
        (
            json!({"student_name": "  ", "student_id": "S1", "teacher_id": "7", "slot": "Mon 10:00-11:00"}),
            400,
        ),
        (
            json!({"student_name": "Asha", "student_id": "S1", "teacher_id": "7", "slot": "Fri 10:00-11:00"}),
            400,
        ),
        (
            json!({"student_name": "Asha", "student_id": "S1", "teacher_id": "404", "slot": "Mon 10:00-11:00"}),
            404,
        ),
    ];

    for (payload, expected) in cases {
        let response = client
            .post(&format!("{}/api/appointments", app.address))
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status().as_u16(), expected, "payload: {}", payload);
    }

    // Nothing was written
    assert!(app.store.load::<AppointmentRecord>().unwrap().is_empty());
}

#[tokio::test]
async fn thoughts_are_stored_verbatim() {
    let app = spawn_app(10).await;
    let client = reqwest::Client::new();
    let text = "He said \"great\",\nthen left, quickly";

    let response = client
        .post(&format!("{}/api/thoughts", app.address))
        .json(&json!({
            "student_name": "Asha",
            "student_id": "S1",
            "teacher_name": "Dr. X",
            "thought": text
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 201);

    let recent: Vec<Value> = client
        .get(&format!("{}/api/thoughts/recent", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0]["Thought"], text);
}

#[tokio::test]
async fn blank_thought_is_rejected() {
    let app = spawn_app(10).await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/thoughts", app.address))
        .json(&json!({
            "student_name": "Asha",
            "student_id": "S1",
            "teacher_name": "Dr. X",
            "thought": "   "
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn quick_stats_count_bookings() {
    let app = spawn_app(10).await;
    let client = reqwest::Client::new();

    for student in ["S1", "S2"] {
        client
            .post(&format!("{}/api/appointments", app.address))
            .json(&json!({
                "student_name": "Someone",
                "student_id": student,
                "teacher_id": "12",
                "slot": "Tue 14:00-15:30"
            }))
            .send()
            .await
            .expect("Failed to execute request");
    }

    let stats: Value = client
        .get(&format!("{}/api/stats", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    assert_eq!(stats["total_teachers"], 2);
    assert_eq!(stats["total_appointments"], 2);
    assert_eq!(stats["most_booked_teacher"], "Prof. Ada Lovelace");
}

#[tokio::test]
async fn admin_roster_upload_and_download() {
    let app = spawn_app(10).await;
    let client = reqwest::Client::new();

    let roster = "\
Teacher_ID,Teacher_Name,Subject,Block,Room_Number,Cabin_Number,Lecture_Start,Lecture_End,Free_Start,Free_End,Available_Days
1,Dr. New,Chemistry,C,301,C9,08:00,09:00,12:00,13:00,Fri
";

    // 1. Upload replaces the roster
    let response = client
        .put(&format!("{}/api/admin/teachers", app.address))
        .header("content-type", "text/csv")
        .body(roster)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["rows"], 1);

    let everyone: Vec<Value> = client
        .get(&format!("{}/api/teachers", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(everyone.len(), 1);
    assert_eq!(everyone[0]["Teacher_Name"], "Dr. New");

    // 2. Download returns the stored CSV as an attachment
    let response = client
        .get(&format!("{}/api/admin/teachers/download", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);
    let disposition = response
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("teacher_dataset_backup.csv"));
    let text = response.text().await.unwrap();
    assert!(text.contains("Dr. New"));
}

#[tokio::test]
async fn admin_rejects_bad_uploads() {
    let app = spawn_app(10).await;
    let client = reqwest::Client::new();

    let response = client
        .put(&format!("{}/api/admin/teachers", app.address))
        .header("content-type", "text/csv")
        .body("")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Uploaded file is empty!");

    let response = client
        .put(&format!("{}/api/admin/teachers", app.address))
        .header("content-type", "text/csv")
        .body("Teacher_ID,Teacher_Name\n1,Dr. Half\n")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 400);

    // The old roster survives
    let everyone: Vec<Value> = client
        .get(&format!("{}/api/teachers", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(everyone.len(), 2);
}

#[tokio::test]
async fn admin_clear_and_analytics() {
    let app = spawn_app(10).await;
    let client = reqwest::Client::new();

    client
        .post(&format!("{}/api/appointments", app.address))
        .json(&json!({
            "student_name": "Asha",
            "student_id": "S1",
            "teacher_id": "7",
            "slot": "Wed 10:00-11:00"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    client
        .post(&format!("{}/api/thoughts", app.address))
        .json(&json!({
            "student_name": "Asha",
            "student_id": "S1",
            "teacher_name": "Dr. X",
            "thought": "Helpful"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let analytics: Value = client
        .get(&format!("{}/api/admin/analytics", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(analytics["roster"]["total_teachers"], 2);
    assert_eq!(analytics["roster"]["unique_subjects"], 2);
    assert_eq!(analytics["appointments"]["total_appointments"], 1);
    assert_eq!(analytics["appointments"]["per_subject"][0]["label"], "Physics");
    assert_eq!(analytics["thoughts"]["total_thoughts"], 1);

    for table in ["appointments", "thoughts"] {
        let response = client
            .delete(&format!("{}/api/admin/{}", app.address, table))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status().as_u16(), 204);
    }

    for kind in [TableKind::Appointments, TableKind::Thoughts] {
        assert!(app.store.raw(kind).unwrap().is_none());
    }

    let analytics: Value = client
        .get(&format!("{}/api/admin/analytics", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(analytics["appointments"]["total_appointments"], 0);
    assert_eq!(analytics["thoughts"]["total_thoughts"], 0);
}
