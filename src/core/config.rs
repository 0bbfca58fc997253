//! Application configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling
//! `dotenvy::dotenv()`.

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Secret key for signing access tokens.
    /// Should be a long random string in production
    pub secret_key: Option<String>,

    /// Access token lifetime in minutes, when overridden
    pub token_expiration_minutes: Option<i64>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self {
            secret_key: std::env::var("SECRET_KEY").ok(),
            token_expiration_minutes: std::env::var("TOKEN_EXPIRATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }

    /// Check if the signing secret is configured
    pub fn has_secret_key(&self) -> bool {
        self.secret_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Constructed directly rather than via env vars so tests stay
    // thread safe.

    #[test]
    fn test_config_with_all_fields() {
        let config = Config {
            secret_key: Some("super-secret-key-123".to_string()),
            token_expiration_minutes: Some(45),
        };

        assert!(config.has_secret_key());
        assert_eq!(config.token_expiration_minutes, Some(45));
    }

    #[test]
    fn test_config_without_secret() {
        let config = Config {
            secret_key: None,
            token_expiration_minutes: None,
        };

        assert!(!config.has_secret_key());
    }
}
