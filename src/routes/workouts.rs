// SPDX-License-Identifier: MIT

//! Workout program CRUD. Owner-scoped; no invariants beyond ownership.

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::CurrentUser;
use crate::models::{generate_id, TrainingDay, Workout};
use crate::routes::auth::MessageResponse;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route(
            "/api/workouts/{workout_id}",
            get(get_workout).put(update_workout).delete(delete_workout),
        )
}

#[derive(Deserialize)]
pub struct CreateWorkoutRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub days: Vec<TrainingDay>,
}

#[derive(Deserialize)]
pub struct UpdateWorkoutRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub days: Option<Vec<TrainingDay>>,
}

/// Fetch a workout and check it belongs to the principal.
pub(crate) async fn owned_workout(
    state: &AppState,
    workout_id: &str,
    user_id: &str,
) -> Result<Workout> {
    state
        .db
        .get_workout(workout_id)
        .await?
        .filter(|workout| workout.user_id == user_id)
        .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", workout_id)))
}

async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<Workout>>> {
    Ok(Json(state.db.list_workouts(&user.user_id).await?))
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateWorkoutRequest>,
) -> Result<Json<Workout>> {
    let workout = Workout {
        workout_id: generate_id("workout"),
        user_id: user.user_id,
        name: payload.name,
        description: payload.description,
        days: payload.days,
        created_at: format_utc_rfc3339(chrono::Utc::now()),
    };
    state.db.upsert_workout(&workout).await?;

    tracing::info!(workout_id = %workout.workout_id, "Workout created");

    Ok(Json(workout))
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(workout_id): Path<String>,
) -> Result<Json<Workout>> {
    let workout = owned_workout(&state, &workout_id, &user.user_id).await?;
    Ok(Json(workout))
}

/// Partial update: only the provided fields change.
async fn update_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(workout_id): Path<String>,
    Json(payload): Json<UpdateWorkoutRequest>,
) -> Result<Json<Workout>> {
    let mut workout = owned_workout(&state, &workout_id, &user.user_id).await?;

    if let Some(name) = payload.name {
        workout.name = name;
    }
    if let Some(description) = payload.description {
        workout.description = description;
    }
    if let Some(days) = payload.days {
        workout.days = days;
    }

    state.db.upsert_workout(&workout).await?;
    Ok(Json(workout))
}

/// Delete a workout and cascade to its logged training sessions.
async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(workout_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let workout = owned_workout(&state, &workout_id, &user.user_id).await?;

    state.db.delete_workout(&workout.workout_id).await?;
    state
        .db
        .delete_sessions_for_workout(&user.user_id, &workout.workout_id)
        .await?;

    tracing::info!(workout_id = %workout.workout_id, "Workout deleted");

    Ok(Json(MessageResponse {
        message: "Workout deleted".to_string(),
    }))
}
