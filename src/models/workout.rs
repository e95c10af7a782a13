//! Workout program models.

use serde::{Deserialize, Serialize};

/// A single exercise within a training day.
///
/// `sets` and `notes` are free text (e.g. "3x10-12"); nothing downstream
/// parses them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    #[serde(default)]
    pub sets: String,
    #[serde(default)]
    pub notes: String,
}

/// One day of a workout program (e.g. "Pull 1").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingDay {
    pub day_number: u32,
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// Workout program stored in the `workouts` collection
/// (document ID = `workout_id`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    pub workout_id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub days: Vec<TrainingDay>,
    pub created_at: String,
}

impl Workout {
    /// Resolve the display name of an exercise by day and exercise index.
    ///
    /// Returns `None` when either index is out of range (the owning day
    /// may have been edited since the session was logged).
    pub fn exercise_name(&self, day_index: usize, exercise_index: usize) -> Option<&str> {
        self.days
            .get(day_index)
            .and_then(|day| day.exercises.get(exercise_index))
            .map(|exercise| exercise.name.as_str())
    }
}
