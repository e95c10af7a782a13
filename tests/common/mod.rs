// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use liftlog::config::Config;
use liftlog::db::FirestoreDb;
use liftlog::error::AppError;
use liftlog::middleware::auth::{IdentityStore, TokenCodec};
use liftlog::models::{SessionRecord, User};
use liftlog::routes::create_router;
use liftlog::services::OauthExchangeService;
use liftlog::AppState;
use std::collections::HashMap;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let db = test_db_offline();
    let token_codec = TokenCodec::new(&config.jwt_secret);
    let oauth = OauthExchangeService::new(config.oauth_exchange_url.clone(), db.clone())
        .expect("Failed to build OAuth exchange service");

    let state = Arc::new(AppState {
        config,
        db,
        token_codec,
        oauth,
    });

    (create_router(state.clone()), state)
}

/// In-memory identity store for exercising credential resolution without
/// a live database.
#[allow(dead_code)]
#[derive(Default)]
pub struct MemoryStore {
    pub users: HashMap<String, User>,
    pub sessions: HashMap<String, SessionRecord>,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.user_id.clone(), user);
        self
    }

    pub fn with_session(mut self, record: SessionRecord) -> Self {
        self.sessions.insert(record.session_token.clone(), record);
        self
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn session_by_token(&self, token: &str) -> Result<Option<SessionRecord>, AppError> {
        Ok(self.sessions.get(token).cloned())
    }

    async fn user_by_id(&self, user_id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.get(user_id).cloned())
    }
}

/// Minimal user fixture.
#[allow(dead_code)]
pub fn test_user(user_id: &str) -> User {
    User {
        user_id: user_id.to_string(),
        email: format!("{}@example.com", user_id),
        name: "Test User".to_string(),
        picture: None,
        password_hash: None,
        created_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

/// Session record fixture expiring at the given timestamp string.
#[allow(dead_code)]
pub fn test_session(token: &str, user_id: &str, expires_at: &str) -> SessionRecord {
    SessionRecord {
        session_token: token.to_string(),
        user_id: user_id.to_string(),
        expires_at: expires_at.to_string(),
        created_at: "2024-01-01T00:00:00Z".to_string(),
    }
}
