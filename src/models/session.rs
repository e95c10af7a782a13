//! Training session models.

use serde::{Deserialize, Serialize};

/// One logged exercise within a training session.
///
/// `weight` and `reps` are unvalidated free text entered by the user
/// (e.g. "80kg", "10,10,8"). The metrics aggregator parses them
/// defensively; a value it cannot parse contributes zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseLog {
    /// Index into the owning workout day's exercise list
    pub exercise_index: usize,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub reps: String,
    #[serde(default)]
    pub notes: String,
}

/// Logged training session stored in the `training_sessions` collection
/// (document ID = `session_id`).
///
/// `workout_name` and `day_name` are snapshots taken at creation so the
/// session stays readable if the program is renamed later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSession {
    pub session_id: String,
    pub user_id: String,
    pub workout_id: String,
    #[serde(default)]
    pub workout_name: String,
    pub day_index: usize,
    #[serde(default)]
    pub day_name: String,
    /// Lexically sortable `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseLog>,
    pub created_at: String,
}
