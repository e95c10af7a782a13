// SPDX-License-Identifier: MIT

//! Typed document models.
//!
//! Everything stored in the document store is a plain struct with the
//! fields validated at the store boundary; handlers never touch untyped
//! maps.

pub mod session;
pub mod user;
pub mod workout;

pub use session::{ExerciseLog, TrainingSession};
pub use user::{SessionRecord, User};
pub use workout::{Exercise, TrainingDay, Workout};

/// Generate an opaque document identifier like `user_3f2a9c81d04b`.
pub fn generate_id(prefix: &str) -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &hex[..12])
}
