//! Application configuration loaded from environment variables.
//!
//! The JWT signing secret is read once at startup and injected into the
//! token codec; nothing reads it from ambient process state afterwards.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// GCP project ID (document store)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// JWT signing secret (raw bytes)
    pub jwt_secret: Vec<u8>,
    /// Endpoint of the OAuth session-data exchange service
    pub oauth_exchange_url: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            jwt_secret: b"test_jwt_secret_32_bytes_minimum".to_vec(),
            oauth_exchange_url: "http://localhost:9099/oauth/session-data".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_SECRET"))?
                .into_bytes(),
            oauth_exchange_url: env::var("OAUTH_EXCHANGE_URL").unwrap_or_else(|_| {
                "https://demobackend.emergentagent.com/auth/v1/env/oauth/session-data".to_string()
            }),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("JWT_SECRET", "test_jwt_secret_32_bytes_minimum");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.jwt_secret, b"test_jwt_secret_32_bytes_minimum");
        assert_eq!(config.port, 8080);
        assert!(config.oauth_exchange_url.ends_with("session-data"));
    }
}
