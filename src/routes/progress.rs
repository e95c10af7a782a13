// SPDX-License-Identifier: MIT

//! Progress and account-level statistics endpoints. The aggregation
//! itself lives in `services::metrics`; these handlers only fetch the
//! session history and hand it over.

use axum::{extract::State, routing::get, Extension, Json, Router};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::CurrentUser;
use crate::services::metrics::{self, AccountStats, WorkoutProgress};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/progress", get(progress))
        .route("/api/stats", get(stats))
}

/// Per-workout, per-exercise progress series over the full history.
async fn progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<HashMap<String, WorkoutProgress>>> {
    let sessions = state
        .db
        .list_training_sessions(
            &user.user_id,
            None,
            firestore::FirestoreQueryDirection::Ascending,
        )
        .await?;

    Ok(Json(metrics::progress_series(&sessions)))
}

/// Account totals: workouts, sessions, sessions this week, volume.
async fn stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<AccountStats>> {
    let workouts = state.db.list_workouts(&user.user_id).await?;
    let sessions = state
        .db
        .list_training_sessions(
            &user.user_id,
            None,
            firestore::FirestoreQueryDirection::Descending,
        )
        .await?;

    let today = chrono::Utc::now().date_naive();
    Ok(Json(metrics::account_stats(
        workouts.len(),
        &sessions,
        today,
    )))
}
