// SPDX-License-Identifier: MIT

//! Credential resolution middleware.
//!
//! Two credential mechanisms share one transport surface: opaque OAuth
//! session tokens (stored server-side, revocable) and signed JWT claims
//! (stateless, unrevocable). Both arrive as a bare string in either the
//! session cookie or an `Authorization: Bearer` header, with no
//! discriminator field. Resolution therefore always tries the session
//! store first and only then attempts a claim decode; session tokens are
//! random strings the decoder would reject anyway, so the ordering is
//! safe but must not be swapped.

use crate::error::AppError;
use crate::models::{SessionRecord, User};
use crate::time_utils::parse_stored_timestamp;
use crate::AppState;
use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Name of the cookie carrying either credential kind.
pub const SESSION_COOKIE: &str = "session_token";

/// Default signed-claim lifetime.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
}

/// Signed identity-claim codec (HS256, shared secret).
///
/// Constructed once from configuration and held in [`AppState`]; issuance
/// and verification never read ambient process state.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Issue a signed claim for a subject, expiring after `ttl`.
    pub fn issue(&self, subject: &str, ttl: chrono::Duration) -> Result<String, AppError> {
        let claims = Claims {
            sub: subject.to_string(),
            exp: (Utc::now() + ttl).timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Token signing failed: {}", e)))
    }

    /// Verify signature and expiry, returning the embedded claims.
    ///
    /// Structural, signature, and expiry failures all collapse into
    /// `InvalidToken`; callers have no reason to distinguish them.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::InvalidToken)
    }
}

/// The store lookups credential resolution needs.
///
/// Implemented by [`crate::db::FirestoreDb`] for the real store and by an
/// in-memory double in tests.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn session_by_token(&self, token: &str) -> Result<Option<SessionRecord>, AppError>;
    async fn user_by_id(&self, user_id: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
impl IdentityStore for crate::db::FirestoreDb {
    async fn session_by_token(&self, token: &str) -> Result<Option<SessionRecord>, AppError> {
        self.get_session(token).await
    }

    async fn user_by_id(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_user(user_id).await
    }
}

/// Resolve an extracted credential value to its user.
///
/// Pure read path: no side effects, idempotent. Failure kinds are
/// distinct (`SessionExpired`, `InvalidToken`, `UserNotFound`) but all
/// render as the same 401 response.
pub async fn resolve_credential<S: IdentityStore + ?Sized>(
    store: &S,
    codec: &TokenCodec,
    token: &str,
) -> Result<User, AppError> {
    // Opaque session token first.
    if let Some(session) = store.session_by_token(token).await? {
        let expired = match parse_stored_timestamp(&session.expires_at) {
            Some(expires_at) => expires_at < Utc::now(),
            // A record with an unreadable expiry is unusable; deny rather
            // than grant an unbounded session.
            None => true,
        };
        if expired {
            return Err(AppError::SessionExpired);
        }

        match store.user_by_id(&session.user_id).await? {
            Some(user) => return Ok(user),
            None => {
                // A session whose owner is gone is not actionable; fall
                // through to claim decoding instead of hard-failing.
                tracing::warn!(
                    user_id = %session.user_id,
                    "Session record references missing user"
                );
            }
        }
    }

    // Then signed claim.
    let claims = codec.verify(token)?;
    if claims.sub.is_empty() {
        return Err(AppError::InvalidToken);
    }

    store
        .user_by_id(&claims.sub)
        .await?
        .ok_or(AppError::UserNotFound)
}

/// Authenticated principal injected into request extensions.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email,
            name: user.name,
            picture: user.picture,
        }
    }
}

/// Middleware that requires a resolvable credential.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Try cookie first, then header
    let token = if let Some(cookie) = jar.get(SESSION_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header {
            Some(h) if h.starts_with("Bearer ") => h[7..].to_string(),
            _ => return Err(AppError::Unauthenticated),
        }
    };

    // A present-but-empty cookie or bearer value is no credential; the
    // store would reject "" as a document id and turn it into a 500.
    if token.is_empty() {
        return Err(AppError::Unauthenticated);
    }

    let user = resolve_credential(&state.db, &state.token_codec, &token).await?;

    request.extensions_mut().insert(CurrentUser::from(user));

    Ok(next.run(request).await)
}
