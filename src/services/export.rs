// SPDX-License-Identifier: MIT

//! Tabular export projection.
//!
//! Builds the row/column projection of a workout program plus its logged
//! sessions that rendering sinks (spreadsheet, PDF) consume. The API
//! serves it as CSV; richer rendering stays outside this crate.

use crate::models::{TrainingSession, Workout};

/// Project a workout and its session history into rows of cells.
///
/// Layout mirrors the printable program sheet: a title row, then per
/// training day a heading row, a header row whose trailing columns are
/// the dates of that day's logged sessions, and one row per exercise
/// with the matching "weight - reps" cell under each session date.
pub fn workout_table(workout: &Workout, sessions: &[TrainingSession]) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    rows.push(vec![format!("LiftLog - {}", workout.name)]);
    rows.push(Vec::new());

    for day in &workout.days {
        let day_index = (day.day_number as usize).saturating_sub(1);
        let day_sessions: Vec<&TrainingSession> = sessions
            .iter()
            .filter(|s| s.day_index == day_index)
            .collect();

        rows.push(vec![format!("Day {}: {}", day.day_number, day.name)]);

        let mut header = vec![
            "Exercise".to_string(),
            "Sets/Reps".to_string(),
            "Notes".to_string(),
        ];
        header.extend(day_sessions.iter().map(|s| s.date.clone()));
        rows.push(header);

        for (exercise_index, exercise) in day.exercises.iter().enumerate() {
            let mut row = vec![
                exercise.name.clone(),
                exercise.sets.clone(),
                exercise.notes.clone(),
            ];
            for session in &day_sessions {
                let cell = session
                    .exercises
                    .iter()
                    .find(|log| log.exercise_index == exercise_index)
                    .map(|log| format!("{} - {}", log.weight, log.reps))
                    .unwrap_or_default();
                row.push(cell);
            }
            rows.push(row);
        }

        rows.push(Vec::new());
    }

    rows
}

/// Render rows as RFC 4180-style CSV.
pub fn to_csv(rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    for row in rows {
        let line: Vec<String> = row.iter().map(|cell| escape_csv(cell)).collect();
        out.push_str(&line.join(","));
        out.push_str("\r\n");
    }
    out
}

fn escape_csv(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
