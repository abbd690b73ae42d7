// src/services/progress.rs

use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::{
    config::{LEGACY_TOTAL_QUESTIONS, REPORT_TIMELINE_LIMIT},
    models::{
        feedback::FeedbackRecord,
        progress::{
            ActivityKind, CorrectVsWrong, ProgressOverview, ProgressReport, Rank, ReportCharts,
            ReportHeader, ScorePoint, Summary, SummaryRow, TimelineEntry,
        },
        quiz_result::QuizResultRecord,
    },
    store::{RecordStore, StoreError},
    utils::time::parse_timestamp,
};

/// Loads both histories and aggregates them for one student.
pub fn summarize(store: &RecordStore, student_id: &str) -> Result<ProgressOverview, StoreError> {
    let results = store.load_or_empty::<QuizResultRecord>()?;
    let thoughts = store.load_or_empty::<FeedbackRecord>()?;
    Ok(aggregate(&results, &thoughts, student_id))
}

/// Pure aggregation over already loaded rows.
pub fn aggregate(
    results: &[QuizResultRecord],
    thoughts: &[FeedbackRecord],
    student_id: &str,
) -> ProgressOverview {
    let student_id = student_id.trim();
    let my_results: Vec<&QuizResultRecord> = results
        .iter()
        .filter(|r| r.student_id.trim() == student_id)
        .collect();
    let my_thoughts: Vec<&FeedbackRecord> = thoughts
        .iter()
        .filter(|t| t.student_id.trim() == student_id)
        .collect();

    let total_quizzes = my_results.len();
    let correct_total: u64 = my_results.iter().map(|r| u64::from(r.score)).sum();
    let attempted: u64 = my_results
        .iter()
        .map(|r| u64::from(r.total_questions.unwrap_or(LEGACY_TOTAL_QUESTIONS)))
        .sum();

    let summary = Summary {
        total_quizzes,
        avg_score: average_score(&my_results),
        total_thoughts: my_thoughts.len(),
        rank: rank_of(results, student_id),
        correct_total,
        wrong_total: attempted.saturating_sub(correct_total),
    };

    let mut score_history: Vec<(Option<NaiveDateTime>, ScorePoint)> = my_results
        .iter()
        .map(|r| {
            (
                parse_timestamp(&r.taken_at),
                ScorePoint {
                    taken_at: r.taken_at.clone(),
                    score: r.score,
                },
            )
        })
        .collect();
    score_history.sort_by(|a, b| chronological(&a.0, &b.0));

    let mut timeline: Vec<(Option<NaiveDateTime>, TimelineEntry)> = my_results
        .iter()
        .map(|r| {
            let total = r
                .total_questions
                .map(|t| t.to_string())
                .unwrap_or_default();
            (
                parse_timestamp(&r.taken_at),
                TimelineEntry {
                    timestamp: r.taken_at.clone(),
                    kind: ActivityKind::Quiz,
                    detail: format!("Score {} / {}", r.score, total),
                },
            )
        })
        .chain(my_thoughts.iter().map(|t| {
            (
                parse_timestamp(&t.submitted_at),
                TimelineEntry {
                    timestamp: t.submitted_at.clone(),
                    kind: ActivityKind::Thought,
                    detail: t.text.clone(),
                },
            )
        }))
        .collect();
    timeline.sort_by(|a, b| reverse_chronological(&a.0, &b.0));

    ProgressOverview {
        student_id: student_id.to_string(),
        summary,
        timeline: timeline.into_iter().map(|(_, e)| e).collect(),
        score_history: score_history.into_iter().map(|(_, p)| p).collect(),
    }
}

fn average_score(results: &[&QuizResultRecord]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let mean = results.iter().map(|r| f64::from(r.score)).sum::<f64>() / results.len() as f64;
    round2(mean)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Unparsable timestamps sort after every parsable one.
fn chronological(a: &Option<NaiveDateTime>, b: &Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn reverse_chronological(a: &Option<NaiveDateTime>, b: &Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.cmp(x),
        _ => chronological(a, b),
    }
}

/// Ranks students by mean score over all results, best first.
///
/// Ties keep the order in which students first appear in `results`.
pub fn rank_of(results: &[QuizResultRecord], student_id: &str) -> Rank {
    let student_id = student_id.trim();

    // (student, score sum, attempts) in first-appearance order
    let mut per_student: Vec<(&str, f64, usize)> = Vec::new();
    for r in results {
        let id = r.student_id.trim();
        match per_student.iter_mut().find(|(s, _, _)| *s == id) {
            Some(entry) => {
                entry.1 += f64::from(r.score);
                entry.2 += 1;
            }
            None => per_student.push((id, f64::from(r.score), 1)),
        }
    }

    let mut averages: Vec<(&str, f64)> = per_student
        .into_iter()
        .map(|(id, sum, n)| (id, sum / n as f64))
        .collect();
    averages.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    match averages.iter().position(|(id, _)| *id == student_id) {
        Some(i) => Rank::Ranked {
            position: i + 1,
            out_of: averages.len(),
        },
        None => Rank::Unranked,
    }
}

/// Builds the export document for one student.
pub fn report(
    overview: &ProgressOverview,
    student_name: &str,
    generated_at: &str,
) -> ProgressReport {
    let summary = &overview.summary;
    let rank = match summary.rank {
        Rank::Ranked { position, out_of } => format!("{} / {}", position, out_of),
        Rank::Unranked => "Not ranked (no quizzes)".to_string(),
    };
    let rows = [
        ("Total Quizzes", summary.total_quizzes.to_string()),
        ("Average Score", summary.avg_score.to_string()),
        ("Total Thoughts", summary.total_thoughts.to_string()),
        ("Rank", rank),
        ("Total Correct Answers", summary.correct_total.to_string()),
        ("Total Wrong Answers", summary.wrong_total.to_string()),
    ];

    let has_quizzes = summary.total_quizzes > 0;
    let charts = ReportCharts {
        scores_over_time: has_quizzes.then(|| overview.score_history.clone()),
        correct_vs_wrong: has_quizzes.then_some(CorrectVsWrong {
            correct: summary.correct_total,
            wrong: summary.wrong_total,
        }),
    };

    ProgressReport {
        header: ReportHeader {
            student_name: student_name.trim().to_string(),
            student_id: overview.student_id.clone(),
            generated_at: generated_at.to_string(),
        },
        summary: rows
            .into_iter()
            .map(|(label, value)| SummaryRow {
                label: label.to_string(),
                value,
            })
            .collect(),
        charts,
        timeline: overview
            .timeline
            .iter()
            .take(REPORT_TIMELINE_LIMIT)
            .cloned()
            .collect(),
        file_name: format!("{}_progress_report.pdf", overview.student_id),
    }
}
