//! User and session-record models.

use serde::{Deserialize, Serialize};

/// User account stored in the `users` collection (document ID = `user_id`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Opaque identifier, generated at creation (`user_<12 hex>`)
    pub user_id: String,
    /// Email address, unique, stored case-sensitively
    pub email: String,
    /// Display name
    pub name: String,
    /// Profile picture URL
    pub picture: Option<String>,
    /// Argon2 PHC digest; None for OAuth-only accounts
    pub password_hash: Option<String>,
    /// When the account was created (RFC3339)
    pub created_at: String,
}

/// OAuth-derived session record stored in the `user_sessions` collection
/// (document ID = `session_token`).
///
/// At most one live record per user: `put_session` purges all prior
/// records before inserting. Expiry is checked lazily at resolution time;
/// there is no background reaper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Opaque token handed to the client
    pub session_token: String,
    /// Owning user
    pub user_id: String,
    /// Absolute expiry (RFC3339; naive values are treated as UTC)
    pub expires_at: String,
    /// When the session was created (RFC3339)
    pub created_at: String,
}
