// SPDX-License-Identifier: MIT

//! Authentication routes: registration, password login, OAuth session
//! exchange, current-user lookup, and logout.
//!
//! Password login and the OAuth exchange both leave the client with a
//! `session_token` cookie; the middleware does not care which mechanism
//! filled it.

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::{CurrentUser, SESSION_COOKIE, TOKEN_TTL_DAYS};
use crate::models::{generate_id, User};
use crate::services::password;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/session", post(oauth_session))
        .route("/api/auth/logout", post(logout))
}

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/auth/me", get(me))
}

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(length(min = 1))]
    pub name: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SessionExchangeRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: CurrentUser,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Build the session cookie set on login and OAuth exchange.
///
/// Cross-site frontend: HTTP-only, secure, `SameSite=None`, 7-day
/// max-age, root path.
fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(time::Duration::days(TOKEN_TTL_DAYS))
        .build()
}

/// Register a new account with a password digest.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if state.db.get_user_by_email(&payload.email).await?.is_some() {
        return Err(AppError::BadRequest("Email already registered".to_string()));
    }

    let user = User {
        user_id: generate_id("user"),
        email: payload.email,
        name: payload.name,
        picture: None,
        password_hash: Some(password::hash_password(&payload.password)?),
        created_at: format_utc_rfc3339(chrono::Utc::now()),
    };
    state.db.upsert_user(&user).await?;

    tracing::info!(user_id = %user.user_id, "User registered");

    let token = state
        .token_codec
        .issue(&user.user_id, chrono::Duration::days(TOKEN_TTL_DAYS))?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Password login issuing a signed claim, delivered both in the body and
/// as the session cookie.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let user = match state.db.get_user_by_email(&payload.email).await? {
        Some(user) => user,
        None => {
            password::dummy_verify(&payload.password);
            return Err(AppError::InvalidCredentials);
        }
    };

    // OAuth-only accounts have no digest and cannot password-login.
    let Some(stored_hash) = user.password_hash.as_deref() else {
        password::dummy_verify(&payload.password);
        return Err(AppError::InvalidCredentials);
    };

    if !password::verify_password(&payload.password, stored_hash) {
        return Err(AppError::InvalidCredentials);
    }

    let token = state
        .token_codec
        .issue(&user.user_id, chrono::Duration::days(TOKEN_TTL_DAYS))?;

    tracing::info!(user_id = %user.user_id, "Password login");

    let jar = jar.add(session_cookie(token.clone()));
    Ok((
        jar,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

/// Exchange an external OAuth session ID for a local session.
async fn oauth_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<SessionExchangeRequest>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let session_id = payload.session_id.unwrap_or_default();
    let (user, token) = state.oauth.exchange(&session_id).await?;

    tracing::info!(user_id = %user.user_id, "OAuth session established");

    let jar = jar.add(session_cookie(token.clone()));
    Ok((
        jar,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

/// Get the authenticated principal.
async fn me(Extension(user): Extension<CurrentUser>) -> Json<CurrentUser> {
    Json(user)
}

/// Logout: revoke the session record (exact token match) and clear the
/// cookie. Claim-carrying cookies have no store record; the delete is a
/// no-op for them.
async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>)> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let token = cookie.value().to_string();
        state.db.delete_session(&token).await?;
    }

    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
    Ok((
        jar,
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    ))
}
