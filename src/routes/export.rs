// SPDX-License-Identifier: MIT

//! Workout export endpoint. Serves the tabular projection from
//! `services::export` as a CSV attachment.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    routing::get,
    Extension, Router,
};
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::CurrentUser;
use crate::routes::workouts::owned_workout;
use crate::services::export::{to_csv, workout_table};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/export/{workout_id}", get(export_workout))
}

/// Export a workout program with its logged history as CSV.
async fn export_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(workout_id): Path<String>,
) -> Result<Response> {
    let workout = owned_workout(&state, &workout_id, &user.user_id).await?;
    let sessions = state
        .db
        .list_training_sessions(
            &user.user_id,
            Some(&workout.workout_id),
            firestore::FirestoreQueryDirection::Ascending,
        )
        .await?;

    let csv = to_csv(&workout_table(&workout, &sessions));
    let filename = sanitize_filename(&workout.name);

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}.csv\"", filename),
        )
        .body(axum::body::Body::from(csv))
        .map_err(|e| anyhow::anyhow!("Failed to build export response: {}", e))?;

    Ok(response)
}

/// Keep only filename-safe characters from the workout name.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "workout".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Push Pull Legs"), "Push_Pull_Legs");
        assert_eq!(sanitize_filename("5x5"), "5x5");
        assert_eq!(sanitize_filename(""), "workout");
    }
}
