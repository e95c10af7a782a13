//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// OAuth-derived session records (keyed by session token)
    pub const USER_SESSIONS: &str = "user_sessions";
    pub const WORKOUTS: &str = "workouts";
    pub const TRAINING_SESSIONS: &str = "training_sessions";
}
