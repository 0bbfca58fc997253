//! JWT issuance and validation using HS256.
//!
//! The backend issues a single short-lived access token per login; there is
//! no refresh-token flow. Expiry is validated with zero leeway so a token is
//! rejected the second it expires.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::core::auth::claims::{Claims, Role};

/// Default access token expiration time (30 minutes)
const TOKEN_EXPIRATION_MINUTES: i64 = 30;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Access token expiration in minutes
    pub expiration_minutes: i64,
    /// Token issuer
    pub issuer: String,
}

impl JwtConfig {
    /// Create a new JWT configuration
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_minutes: TOKEN_EXPIRATION_MINUTES,
            issuer: "studyhub".to_string(),
        }
    }

    /// Create config from environment variables
    pub fn from_env() -> Result<Self, JwtError> {
        let secret = std::env::var("SECRET_KEY").map_err(|_| JwtError::MissingSecret)?;

        let expiration_minutes = std::env::var("TOKEN_EXPIRATION_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(TOKEN_EXPIRATION_MINUTES);

        let issuer = std::env::var("TOKEN_ISSUER").unwrap_or_else(|_| "studyhub".to_string());

        Ok(Self {
            secret,
            expiration_minutes,
            issuer,
        })
    }

    /// Set token expiration
    pub fn expiration(mut self, minutes: i64) -> Self {
        self.expiration_minutes = minutes;
        self
    }

    /// Set issuer
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }
}

/// JWT errors
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("SECRET_KEY environment variable not set")]
    MissingSecret,

    #[error("Token encoding failed: {0}")]
    EncodingError(String),

    #[error("Token decoding failed: {0}")]
    DecodingError(String),

    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    InvalidToken,
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::InvalidToken | ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                JwtError::InvalidToken
            }
            _ => JwtError::DecodingError(err.to_string()),
        }
    }
}

/// JWT service for token operations
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// Create a new JWT service
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Create JWT service from environment variables
    pub fn from_env() -> Result<Self, JwtError> {
        let config = JwtConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Issue an access token for a user, returning the token and its expiry.
    pub fn issue_token(
        &self,
        username: &str,
        role: Role,
        email: Option<&str>,
    ) -> Result<(String, i64), JwtError> {
        let now = Utc::now();
        let exp = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: username.to_string(),
            user_type: role,
            email: email.map(str::to_string),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.config.issuer.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))?;

        Ok((token, exp.timestamp()))
    }

    /// Validate signature, issuer, and expiry, and return the claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);
        // Zero leeway: a token is invalid the second it expires
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::claims::decode_claims;

    fn create_test_service() -> JwtService {
        let config = JwtConfig::new("test_secret_key_for_testing_only_32bytes!");
        JwtService::new(config)
    }

    // ========================================================================
    // JwtConfig Tests
    // ========================================================================

    #[test]
    fn test_jwt_config_new() {
        let config = JwtConfig::new("my_secret");

        assert_eq!(config.secret, "my_secret");
        assert_eq!(config.expiration_minutes, TOKEN_EXPIRATION_MINUTES);
        assert_eq!(config.issuer, "studyhub");
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("secret").expiration(45).issuer("my_app");

        assert_eq!(config.expiration_minutes, 45);
        assert_eq!(config.issuer, "my_app");
    }

    // ========================================================================
    // Issue / Validate Tests
    // ========================================================================

    #[test]
    fn test_issue_token() {
        let service = create_test_service();

        let (token, exp) = service
            .issue_token("alice", Role::Student, Some("alice@example.com"))
            .unwrap();

        assert!(!token.is_empty());
        assert!(exp > Utc::now().timestamp());
    }

    #[test]
    fn test_validate_token_roundtrip() {
        let service = create_test_service();

        let (token, exp) = service
            .issue_token("alice", Role::Instructor, Some("alice@example.com"))
            .unwrap();

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.user_type, Role::Instructor);
        assert_eq!(claims.email.as_deref(), Some("alice@example.com"));
        assert_eq!(claims.exp, exp);
        assert_eq!(claims.iss, "studyhub");
    }

    #[test]
    fn test_validate_invalid_token() {
        let service = create_test_service();

        let result = service.validate_token("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_token_wrong_secret() {
        let service1 = JwtService::new(JwtConfig::new("secret_one"));
        let service2 = JwtService::new(JwtConfig::new("secret_two"));

        let (token, _) = service1.issue_token("alice", Role::Student, None).unwrap();

        let result = service2.validate_token(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_validate_wrong_issuer() {
        let issuing = JwtService::new(JwtConfig::new("secret").issuer("someone-else"));
        let validating = JwtService::new(JwtConfig::new("secret"));

        let (token, _) = issuing.issue_token("alice", Role::Student, None).unwrap();

        assert!(validating.validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token() {
        // Negative expiration so the token is already expired when issued
        let config = JwtConfig::new("test_secret").expiration(-1);
        let service = JwtService::new(config);

        let (token, _) = service.issue_token("alice", Role::Student, None).unwrap();

        let result = service.validate_token(&token);
        assert!(
            matches!(result, Err(JwtError::Expired)),
            "Expected Expired error, got: {:?}",
            result
        );
    }

    #[test]
    fn test_issued_token_decodes_without_verification() {
        // The client-side codec must read the same claims the server signed.
        let service = create_test_service();

        let (token, _) = service
            .issue_token("bob", Role::Admin, Some("bob@example.com"))
            .unwrap();

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub, "bob");
        assert_eq!(claims.user_type, Role::Admin);
        assert_eq!(claims.email.as_deref(), Some("bob@example.com"));
    }

    // ========================================================================
    // Error Tests
    // ========================================================================

    #[test]
    fn test_jwt_error_display() {
        assert_eq!(
            format!("{}", JwtError::MissingSecret),
            "SECRET_KEY environment variable not set"
        );
        assert_eq!(format!("{}", JwtError::Expired), "Token expired");
        assert_eq!(format!("{}", JwtError::InvalidToken), "Invalid token");
    }
}
