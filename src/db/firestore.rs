// SPDX-License-Identifier: MIT

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (accounts, looked up by ID or email)
//! - Session records (opaque OAuth session tokens)
//! - Workouts (training programs)
//! - Training sessions (logged workouts)
//!
//! All filters are exact-match; mutation is per-document upsert/delete.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{SessionRecord, TrainingSession, User, Workout};
use crate::time_utils::format_utc_rfc3339;

/// Default session lifetime.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // The emulator ignores token contents but the SDK still wants one.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by their opaque identifier.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user by email (exact, case-sensitive match).
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let email = email.to_string();
        let users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(move |q| q.for_all([q.field("email").eq(email.clone())]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(users.into_iter().next())
    }

    /// Create or update a user.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.user_id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Session Record Operations ───────────────────────────────

    /// Get a session record by its opaque token.
    pub async fn get_session(&self, token: &str) -> Result<Option<SessionRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USER_SESSIONS)
            .obj()
            .one(token)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a session record, replacing any prior sessions for the user.
    ///
    /// Single-session-per-user is enforced purely by this purge-then-insert
    /// sequence. The purge and insert are separate document writes, so two
    /// concurrent calls for the same user can leave both records live; this
    /// is an accepted race for a low-contention single-device client.
    pub async fn put_session(
        &self,
        user_id: &str,
        token: &str,
        ttl: chrono::Duration,
    ) -> Result<SessionRecord, AppError> {
        let stale = self.sessions_for_user(user_id).await?;
        for record in &stale {
            self.delete_session(&record.session_token).await?;
        }
        if !stale.is_empty() {
            tracing::debug!(user_id, purged = stale.len(), "Purged prior session records");
        }

        let now = chrono::Utc::now();
        let record = SessionRecord {
            session_token: token.to_string(),
            user_id: user_id.to_string(),
            expires_at: format_utc_rfc3339(now + ttl),
            created_at: format_utc_rfc3339(now),
        };

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USER_SESSIONS)
            .document_id(token)
            .object(&record)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(record)
    }

    /// Delete a session record by exact token (logout).
    pub async fn delete_session(&self, token: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::USER_SESSIONS)
            .document_id(token)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// All session records owned by a user.
    async fn sessions_for_user(&self, user_id: &str) -> Result<Vec<SessionRecord>, AppError> {
        let user_id = user_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USER_SESSIONS)
            .filter(move |q| q.for_all([q.field("user_id").eq(user_id.clone())]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Workout Operations ──────────────────────────────────────

    /// Get a workout by ID. Ownership is checked by the caller.
    pub async fn get_workout(&self, workout_id: &str) -> Result<Option<Workout>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::WORKOUTS)
            .obj()
            .one(workout_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All workouts owned by a user.
    pub async fn list_workouts(&self, user_id: &str) -> Result<Vec<Workout>, AppError> {
        let user_id = user_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::WORKOUTS)
            .filter(move |q| q.for_all([q.field("user_id").eq(user_id.clone())]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a workout.
    pub async fn upsert_workout(&self, workout: &Workout) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::WORKOUTS)
            .document_id(&workout.workout_id)
            .object(workout)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a workout document.
    pub async fn delete_workout(&self, workout_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::WORKOUTS)
            .document_id(workout_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Training Session Operations ─────────────────────────────

    /// Get a training session by ID. Ownership is checked by the caller.
    pub async fn get_training_session(
        &self,
        session_id: &str,
    ) -> Result<Option<TrainingSession>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::TRAINING_SESSIONS)
            .obj()
            .one(session_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Training sessions for a user, optionally filtered by workout,
    /// ordered by date.
    pub async fn list_training_sessions(
        &self,
        user_id: &str,
        workout_id: Option<&str>,
        direction: firestore::FirestoreQueryDirection,
    ) -> Result<Vec<TrainingSession>, AppError> {
        let query = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::TRAINING_SESSIONS);

        let user_id = user_id.to_string();
        let query = if let Some(workout_id) = workout_id {
            let workout_id = workout_id.to_string();
            query.filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    q.field("workout_id").eq(workout_id.clone()),
                ])
            })
        } else {
            query.filter(move |q| q.for_all([q.field("user_id").eq(user_id.clone())]))
        };

        query
            .order_by([("date", direction)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a training session.
    pub async fn upsert_training_session(
        &self,
        session: &TrainingSession,
    ) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::TRAINING_SESSIONS)
            .document_id(&session.session_id)
            .object(session)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a training session document.
    pub async fn delete_training_session(&self, session_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::TRAINING_SESSIONS)
            .document_id(session_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete all of a user's training sessions for one workout
    /// (cascade from workout deletion).
    ///
    /// Returns the number of documents deleted.
    pub async fn delete_sessions_for_workout(
        &self,
        user_id: &str,
        workout_id: &str,
    ) -> Result<usize, AppError> {
        let sessions = self
            .list_training_sessions(
                user_id,
                Some(workout_id),
                firestore::FirestoreQueryDirection::Ascending,
            )
            .await?;

        for session in &sessions {
            self.delete_training_session(&session.session_id).await?;
        }

        tracing::debug!(
            user_id,
            workout_id,
            count = sessions.len(),
            "Deleted training sessions for workout"
        );

        Ok(sessions.len())
    }
}
