// SPDX-License-Identifier: MIT

//! OAuth session exchange.
//!
//! Trades the short-lived session ID handed to the frontend by the OAuth
//! provider for verified user attributes plus an opaque session token,
//! then materializes the local user and session records. Invoked once,
//! out of band, before normal request flow begins.

use crate::db::firestore::SESSION_TTL_DAYS;
use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{generate_id, User};
use crate::time_utils::format_utc_rfc3339;
use serde::Deserialize;

/// Upper bound on the remote exchange call.
const EXCHANGE_TIMEOUT_SECS: u64 = 10;

/// Verified identity returned by the exchange endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OauthSessionData {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
    pub session_token: String,
}

/// Client for the OAuth session-data exchange endpoint.
#[derive(Clone)]
pub struct OauthExchangeService {
    http: reqwest::Client,
    endpoint: String,
    db: FirestoreDb,
}

impl OauthExchangeService {
    pub fn new(endpoint: String, db: FirestoreDb) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(EXCHANGE_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            http,
            endpoint,
            db,
        })
    }

    /// Exchange an external session ID for a local principal and session
    /// token.
    ///
    /// Idempotent per email: a repeated exchange refreshes the existing
    /// account instead of creating a duplicate, and each call supersedes
    /// the previous session record.
    pub async fn exchange(&self, session_id: &str) -> Result<(User, String), AppError> {
        if session_id.trim().is_empty() {
            return Err(AppError::BadRequest("session_id required".to_string()));
        }

        let data = self.fetch_session_data(session_id).await?;
        self.materialize(data).await
    }

    /// Call the remote exchange endpoint.
    async fn fetch_session_data(&self, session_id: &str) -> Result<OauthSessionData, AppError> {
        let response = self
            .http
            .get(&self.endpoint)
            .header("X-Session-ID", session_id)
            .send()
            .await
            .map_err(|e| AppError::OauthExchange(format!("Session data request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::OauthExchange(format!(
                "Session data endpoint returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::OauthExchange(format!("Malformed session data: {}", e)))
    }

    /// Upsert the user record and store the session token.
    ///
    /// Split out from [`Self::exchange`] so the store-side semantics can
    /// be exercised without the remote endpoint.
    pub async fn materialize(&self, data: OauthSessionData) -> Result<(User, String), AppError> {
        let user = match self.db.get_user_by_email(&data.email).await? {
            Some(mut existing) => {
                // Re-login refreshes name and picture; identifier and
                // password digest stay as they are.
                existing.name = data.name;
                existing.picture = data.picture;
                self.db.upsert_user(&existing).await?;
                existing
            }
            None => {
                let user = User {
                    user_id: generate_id("user"),
                    email: data.email,
                    name: data.name,
                    picture: data.picture,
                    password_hash: None,
                    created_at: format_utc_rfc3339(chrono::Utc::now()),
                };
                self.db.upsert_user(&user).await?;
                tracing::info!(user_id = %user.user_id, "Created user from OAuth exchange");
                user
            }
        };

        self.db
            .put_session(
                &user.user_id,
                &data.session_token,
                chrono::Duration::days(SESSION_TTL_DAYS),
            )
            .await?;

        Ok((user, data.session_token))
    }
}
