// SPDX-License-Identifier: MIT

//! Derived training metrics: per-exercise progress series and
//! whole-account statistics.
//!
//! Weight and reps are unvalidated free text ("80kg", "10,10,8",
//! "bodyweight"). Parsing is best-effort by policy: anything unreadable
//! contributes zero to that entry only, so one malformed historical log
//! never takes down the whole aggregation. Everything here is stateless
//! and recomputed per request.

use crate::models::TrainingSession;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

/// One data point in an exercise's progress series.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProgressPoint {
    /// Session date (`YYYY-MM-DD`)
    pub date: String,
    /// Parsed weight; 0.0 when the raw text was unreadable
    pub weight: f64,
    /// Raw reps text, passed through for display
    pub reps: String,
}

/// Progress data for one workout program.
#[derive(Debug, Clone, Serialize, Default)]
pub struct WorkoutProgress {
    pub workout_name: String,
    pub sessions_count: u32,
    /// Per exercise index, points ordered by date ascending
    pub exercises: HashMap<usize, Vec<ProgressPoint>>,
}

/// Whole-account statistics.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccountStats {
    pub total_workouts: usize,
    pub total_sessions: usize,
    pub sessions_this_week: usize,
    /// Σ weight × reps, rounded to one decimal
    pub total_volume: f64,
}

/// Parse a free-text weight field.
///
/// Strips a `kg` unit suffix, treats `,` as a decimal separator, and
/// takes the numeric prefix before an `x` multiplier separator
/// ("3x10" style entries). Unreadable input yields `0.0`, never an error.
pub fn parse_weight(raw: &str) -> f64 {
    let cleaned = raw.replace("kg", "").replace(',', ".");
    cleaned
        .split('x')
        .next()
        .unwrap_or_default()
        .trim()
        .parse::<f64>()
        .unwrap_or(0.0)
}

/// Sum the numeric tokens of a comma-separated reps field.
///
/// Non-numeric tokens ("failure", "AMRAP") are skipped.
pub fn sum_reps(raw: &str) -> u32 {
    raw.split(',')
        .filter_map(|token| {
            let token = token.trim();
            if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
                token.parse::<u32>().ok()
            } else {
                None
            }
        })
        .sum()
}

/// First day (Monday) of the week containing `today`, as `YYYY-MM-DD`.
pub fn week_start(today: NaiveDate) -> String {
    let monday = today - chrono::Duration::days(today.weekday().num_days_from_monday() as i64);
    monday.format("%Y-%m-%d").to_string()
}

/// Group a user's session history into per-workout progress series.
///
/// Keyed by workout ID; per-exercise points are ordered by date
/// ascending regardless of input order.
pub fn progress_series(sessions: &[TrainingSession]) -> HashMap<String, WorkoutProgress> {
    let mut ordered: Vec<&TrainingSession> = sessions.iter().collect();
    ordered.sort_by(|a, b| a.date.cmp(&b.date));

    let mut progress: HashMap<String, WorkoutProgress> = HashMap::new();

    for session in ordered {
        let entry = progress
            .entry(session.workout_id.clone())
            .or_insert_with(|| WorkoutProgress {
                workout_name: session.workout_name.clone(),
                ..WorkoutProgress::default()
            });
        entry.sessions_count += 1;

        for log in &session.exercises {
            entry
                .exercises
                .entry(log.exercise_index)
                .or_default()
                .push(ProgressPoint {
                    date: session.date.clone(),
                    weight: parse_weight(&log.weight),
                    reps: log.reps.clone(),
                });
        }
    }

    progress
}

/// Compute whole-account statistics over a user's full session history.
///
/// `today` is the current UTC date, passed in so the Monday week boundary
/// is deterministic under test.
pub fn account_stats(
    total_workouts: usize,
    sessions: &[TrainingSession],
    today: NaiveDate,
) -> AccountStats {
    let week_start = week_start(today);
    let sessions_this_week = sessions
        .iter()
        .filter(|s| s.date.as_str() >= week_start.as_str())
        .count();

    let total_volume: f64 = sessions
        .iter()
        .flat_map(|s| s.exercises.iter())
        .map(|log| parse_weight(&log.weight) * f64::from(sum_reps(&log.reps)))
        .sum();

    AccountStats {
        total_workouts,
        total_sessions: sessions.len(),
        sessions_this_week,
        total_volume: (total_volume * 10.0).round() / 10.0,
    }
}
