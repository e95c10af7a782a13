// SPDX-License-Identifier: MIT

//! Training session CRUD.
//!
//! Session detail resolves strictly by `{session_id, user_id}` and
//! enriches each log entry with the exercise's display name from the
//! owning workout's day/exercise arrays, falling back to a generic
//! placeholder when an index no longer resolves.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::CurrentUser;
use crate::models::{generate_id, ExerciseLog, TrainingSession};
use crate::routes::auth::MessageResponse;
use crate::routes::workouts::owned_workout;
use crate::time_utils::{format_utc_rfc3339, today_utc};
use crate::AppState;

/// Display name used when a logged index no longer maps to a program
/// exercise (the program was edited or deleted after logging).
const FALLBACK_EXERCISE_NAME: &str = "Exercise";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/sessions", get(list_sessions).post(create_session))
        .route(
            "/api/sessions/{session_id}",
            get(get_session).delete(delete_session),
        )
}

#[derive(Deserialize)]
pub struct SessionsQuery {
    pub workout_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub workout_id: String,
    pub day_index: usize,
    pub date: Option<String>,
    #[serde(default)]
    pub exercises: Vec<ExerciseLog>,
}

/// One log entry with its resolved display name.
#[derive(Serialize)]
pub struct NamedExerciseLog {
    pub exercise_index: usize,
    pub weight: String,
    pub reps: String,
    pub notes: String,
    pub exercise_name: String,
}

/// Session detail enriched with exercise names.
#[derive(Serialize)]
pub struct SessionDetailResponse {
    pub session_id: String,
    pub workout_id: String,
    pub workout_name: String,
    pub day_index: usize,
    pub day_name: String,
    pub date: String,
    pub created_at: String,
    pub exercises: Vec<NamedExerciseLog>,
}

async fn owned_session(
    state: &AppState,
    session_id: &str,
    user_id: &str,
) -> Result<TrainingSession> {
    state
        .db
        .get_training_session(session_id)
        .await?
        .filter(|session| session.user_id == user_id)
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", session_id)))
}

/// List sessions, newest first, optionally scoped to one workout.
async fn list_sessions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<SessionsQuery>,
) -> Result<Json<Vec<TrainingSession>>> {
    let sessions = state
        .db
        .list_training_sessions(
            &user.user_id,
            query.workout_id.as_deref(),
            firestore::FirestoreQueryDirection::Descending,
        )
        .await?;
    Ok(Json(sessions))
}

/// Log a training session against an existing workout.
async fn create_session(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<Json<TrainingSession>> {
    let workout = owned_workout(&state, &payload.workout_id, &user.user_id).await?;

    let day_name = workout
        .days
        .get(payload.day_index)
        .map(|day| day.name.clone())
        .unwrap_or_default();

    let session = TrainingSession {
        session_id: generate_id("session"),
        user_id: user.user_id,
        workout_id: workout.workout_id,
        workout_name: workout.name,
        day_index: payload.day_index,
        day_name,
        date: payload.date.unwrap_or_else(today_utc),
        exercises: payload.exercises,
        created_at: format_utc_rfc3339(chrono::Utc::now()),
    };
    state.db.upsert_training_session(&session).await?;

    tracing::info!(session_id = %session.session_id, "Training session logged");

    Ok(Json(session))
}

/// Session detail with exercise names cross-referenced from the program.
async fn get_session(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionDetailResponse>> {
    let session = owned_session(&state, &session_id, &user.user_id).await?;

    // The owning workout may have been deleted; enrichment then falls
    // back to the placeholder for every entry.
    let workout = state
        .db
        .get_workout(&session.workout_id)
        .await?
        .filter(|workout| workout.user_id == user.user_id);

    let exercises = session
        .exercises
        .iter()
        .map(|log| NamedExerciseLog {
            exercise_index: log.exercise_index,
            weight: log.weight.clone(),
            reps: log.reps.clone(),
            notes: log.notes.clone(),
            exercise_name: workout
                .as_ref()
                .and_then(|w| w.exercise_name(session.day_index, log.exercise_index))
                .unwrap_or(FALLBACK_EXERCISE_NAME)
                .to_string(),
        })
        .collect();

    Ok(Json(SessionDetailResponse {
        session_id: session.session_id,
        workout_id: session.workout_id,
        workout_name: session.workout_name,
        day_index: session.day_index,
        day_name: session.day_name,
        date: session.date,
        created_at: session.created_at,
        exercises,
    }))
}

async fn delete_session(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(session_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let session = owned_session(&state, &session_id, &user.user_id).await?;
    state.db.delete_training_session(&session.session_id).await?;

    Ok(Json(MessageResponse {
        message: "Session deleted".to_string(),
    }))
}
