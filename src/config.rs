//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GCP project ID identifying the document store
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Directory of static assets served under `/public`
    pub public_dir: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every knob has a default so a bare environment works for local
    /// development (with the Firestore emulator).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => 3000,
        };

        Ok(Self {
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port,
            public_dir: env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string()),
        })
    }

    /// Default config for tests.
    pub fn test_default() -> Self {
        Self {
            gcp_project_id: "test-project".to_string(),
            port: 3000,
            public_dir: "public".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
