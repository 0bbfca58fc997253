//! Authentication service.
//!
//! Business logic for registration and login against the in-memory user
//! store: input validation, bcrypt password hashing, credential checks, and
//! token issuance through the JWT service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::core::auth::claims::{Claims, Role};
use crate::core::auth::jwt::{JwtError, JwtService};

/// Cost factor for bcrypt hashing (12 is recommended for production)
const BCRYPT_COST: u32 = 12;

/// Authentication service error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Username or email already registered")]
    AlreadyRegistered,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::TokenExpired,
            JwtError::InvalidToken => AuthError::InvalidToken,
            _ => AuthError::InternalError(err.to_string()),
        }
    }
}

/// Registration request data
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub user_type: Role,
}

/// Login request data
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response: the access token plus the fields the client routes on.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user_type: Role,
    pub username: String,
}

/// Public view of a stored user (no password hash).
#[derive(Debug, Clone, serde::Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub user_type: Role,
    pub created_at: DateTime<Utc>,
}

/// A stored user record.
#[derive(Debug, Clone)]
struct UserRecord {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    role: Role,
    created_at: DateTime<Utc>,
}

impl UserRecord {
    fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            user_type: self.role,
            created_at: self.created_at,
        }
    }
}

/// In-memory user store keyed by username.
#[derive(Clone, Default)]
pub struct UserStore {
    users: Arc<DashMap<String, UserRecord>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn email_taken(&self, email: &str) -> bool {
        self.users.iter().any(|entry| entry.email == email)
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    users: UserStore,
    jwt: JwtService,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(users: UserStore, jwt: JwtService) -> Self {
        Self { users, jwt }
    }

    /// Validate email format
    fn validate_email(email: &str) -> Result<(), AuthError> {
        let invalid = || AuthError::Validation("Invalid email format".to_string());

        let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(invalid());
        }
        if domain.split('.').any(str::is_empty) {
            return Err(invalid());
        }

        Ok(())
    }

    /// Validate username format
    fn validate_username(username: &str) -> Result<(), AuthError> {
        if username.len() < 3 || username.len() > 50 {
            return Err(AuthError::Validation(
                "Username must be 3-50 characters".to_string(),
            ));
        }

        if !username
            .chars()
            .next()
            .map(|c| c.is_alphabetic())
            .unwrap_or(false)
        {
            return Err(AuthError::Validation(
                "Username must start with a letter".to_string(),
            ));
        }

        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            return Err(AuthError::Validation(
                "Username can only contain letters, numbers, underscores, and hyphens".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate password strength
    fn validate_password(password: &str) -> Result<(), AuthError> {
        if password.len() < 8 {
            return Err(AuthError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Register a new user. Does not issue a token: clients establish a
    /// session with a follow-up login call.
    pub fn register(&self, request: &RegisterRequest) -> Result<UserProfile, AuthError> {
        Self::validate_username(&request.username)?;
        Self::validate_email(&request.email)?;
        Self::validate_password(&request.password)?;

        if self.users.users.contains_key(&request.username)
            || self.users.email_taken(&request.email)
        {
            return Err(AuthError::AlreadyRegistered);
        }

        let password_hash = bcrypt::hash(&request.password, BCRYPT_COST)
            .map_err(|e| AuthError::InternalError(e.to_string()))?;

        let record = UserRecord {
            id: Uuid::new_v4(),
            username: request.username.clone(),
            email: request.email.clone(),
            password_hash,
            role: request.user_type,
            created_at: Utc::now(),
        };
        let profile = record.profile();

        self.users.users.insert(request.username.clone(), record);

        Ok(profile)
    }

    /// Authenticate a user and issue an access token.
    pub fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AuthError> {
        let user = self
            .users
            .users
            .get(&request.username)
            .ok_or(AuthError::InvalidCredentials)?;

        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AuthError::InternalError(e.to_string()))?;
        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        let (access_token, _exp) =
            self.jwt
                .issue_token(&user.username, user.role, Some(&user.email))?;

        Ok(LoginResponse {
            access_token,
            token_type: "bearer".to_string(),
            user_type: user.role,
            username: user.username.clone(),
        })
    }

    /// Validate a bearer token and return its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        Ok(self.jwt.validate_token(token)?)
    }

    /// Resolve a bearer token to the stored user profile.
    pub fn current_user(&self, token: &str) -> Result<UserProfile, AuthError> {
        let claims = self.validate_token(token)?;

        self.users
            .users
            .get(&claims.sub)
            .map(|user| user.profile())
            .ok_or(AuthError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::jwt::JwtConfig;

    fn test_service() -> AuthService {
        let jwt = JwtService::new(JwtConfig::new("test_secret_key_for_testing_only"));
        AuthService::new(UserStore::new(), jwt)
    }

    fn register_alice(service: &AuthService) {
        service
            .register(&RegisterRequest {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "correct-horse".to_string(),
                user_type: Role::Student,
            })
            .unwrap();
    }

    // ========================================================================
    // Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_email_valid() {
        assert!(AuthService::validate_email("user@example.com").is_ok());
        assert!(AuthService::validate_email("user.name@example.co.uk").is_ok());
        assert!(AuthService::validate_email("a@b.co").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(AuthService::validate_email("").is_err());
        assert!(AuthService::validate_email("invalid").is_err());
        assert!(AuthService::validate_email("@example.com").is_err());
        assert!(AuthService::validate_email("user@").is_err());
        assert!(AuthService::validate_email("user@example").is_err());
        assert!(AuthService::validate_email("user@.com").is_err());
        assert!(AuthService::validate_email("user@example.").is_err());
    }

    #[test]
    fn test_validate_username_valid() {
        assert!(AuthService::validate_username("bob").is_ok());
        assert!(AuthService::validate_username("bob_the-builder1").is_ok());
    }

    #[test]
    fn test_validate_username_invalid() {
        assert!(AuthService::validate_username("").is_err());
        assert!(AuthService::validate_username("ab").is_err());
        assert!(AuthService::validate_username("a".repeat(51).as_str()).is_err());
        assert!(AuthService::validate_username("1bob").is_err());
        assert!(AuthService::validate_username("bob smith").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(AuthService::validate_password("longenough").is_ok());
        assert!(AuthService::validate_password("short").is_err());
    }

    // ========================================================================
    // Register / Login Tests
    // ========================================================================

    #[test]
    fn test_register_and_login() {
        let service = test_service();
        register_alice(&service);

        let response = service
            .login(&LoginRequest {
                username: "alice".to_string(),
                password: "correct-horse".to_string(),
            })
            .unwrap();

        assert_eq!(response.username, "alice");
        assert_eq!(response.user_type, Role::Student);
        assert_eq!(response.token_type, "bearer");

        let claims = service.validate_token(&response.access_token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.user_type, Role::Student);
        assert_eq!(claims.email.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn test_register_duplicate_username() {
        let service = test_service();
        register_alice(&service);

        let result = service.register(&RegisterRequest {
            username: "alice".to_string(),
            email: "other@example.com".to_string(),
            password: "anotherpass".to_string(),
            user_type: Role::Instructor,
        });
        assert!(matches!(result, Err(AuthError::AlreadyRegistered)));
    }

    #[test]
    fn test_register_duplicate_email() {
        let service = test_service();
        register_alice(&service);

        let result = service.register(&RegisterRequest {
            username: "alice2".to_string(),
            email: "alice@example.com".to_string(),
            password: "anotherpass".to_string(),
            user_type: Role::Student,
        });
        assert!(matches!(result, Err(AuthError::AlreadyRegistered)));
    }

    #[test]
    fn test_login_wrong_password() {
        let service = test_service();
        register_alice(&service);

        let result = service.login(&LoginRequest {
            username: "alice".to_string(),
            password: "wrong-horse".to_string(),
        });
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_login_unknown_user() {
        let service = test_service();

        let result = service.login(&LoginRequest {
            username: "nobody".to_string(),
            password: "whatever1".to_string(),
        });
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_current_user() {
        let service = test_service();
        register_alice(&service);

        let response = service
            .login(&LoginRequest {
                username: "alice".to_string(),
                password: "correct-horse".to_string(),
            })
            .unwrap();

        let profile = service.current_user(&response.access_token).unwrap();
        assert_eq!(profile.username, "alice");
        assert_eq!(profile.email, "alice@example.com");
        assert_eq!(profile.user_type, Role::Student);
    }

    #[test]
    fn test_current_user_garbage_token() {
        let service = test_service();

        let result = service.current_user("not-a-token");
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    // ========================================================================
    // Error Display Tests
    // ========================================================================

    #[test]
    fn test_auth_error_display() {
        assert_eq!(
            format!("{}", AuthError::InvalidCredentials),
            "Incorrect username or password"
        );
        assert_eq!(
            format!("{}", AuthError::AlreadyRegistered),
            "Username or email already registered"
        );
        assert_eq!(format!("{}", AuthError::TokenExpired), "Token expired");
    }
}
