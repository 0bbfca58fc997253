//! Auth API endpoints.
//!
//! - `POST /api/v1/auth/login` - Authenticate and receive an access token
//! - `POST /api/v1/auth/register` - Create an account (no token issued)
//! - `GET  /api/v1/auth/me` - Current profile from a bearer token
//!
//! Errors are returned as `{"detail": "..."}` bodies, the shape the client
//! surfaces to the user verbatim.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;

use crate::core::auth::service::{
    AuthError, AuthService, LoginRequest, LoginResponse, RegisterRequest, UserProfile,
};

/// Auth API state containing the auth service
#[derive(Clone)]
pub struct AuthApiState {
    pub auth_service: AuthService,
}

/// API error response body
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub detail: String,
}

impl ApiError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Convert AuthError to an API response
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::AlreadyRegistered | AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ApiError::new(self.to_string()))).into_response()
    }
}

/// Create the auth API router
pub fn auth_api_router(state: AuthApiState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/api/v1/auth/register", post(register_handler))
        .route("/api/v1/auth/login", post(login_handler))
        .route("/api/v1/auth/me", get(me_handler))
        .with_state(state)
}

/// POST /api/v1/auth/register
async fn register_handler(
    State(state): State<Arc<AuthApiState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserProfile>), AuthError> {
    tracing::info!("Registration attempt for username: {}", request.username);

    let profile = state.auth_service.register(&request)?;

    tracing::info!("User registered successfully: {}", profile.username);

    Ok((StatusCode::CREATED, Json(profile)))
}

/// POST /api/v1/auth/login
async fn login_handler(
    State(state): State<Arc<AuthApiState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    tracing::info!("Login attempt for username: {}", request.username);

    let response = state.auth_service.login(&request)?;

    tracing::info!("User logged in successfully: {}", response.username);

    Ok(Json(response))
}

/// GET /api/v1/auth/me
async fn me_handler(
    State(state): State<Arc<AuthApiState>>,
    headers: HeaderMap,
) -> Result<Json<UserProfile>, AuthError> {
    let token = extract_bearer_token(&headers)?;

    let profile = state.auth_service.current_user(&token)?;

    Ok(Json(profile))
}

/// Extract the Bearer token from the Authorization header
pub(crate) fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::InvalidToken)?;

    if !auth_header.starts_with("Bearer ") {
        return Err(AuthError::InvalidToken);
    }

    let token = auth_header.trim_start_matches("Bearer ").to_string();

    if token.is_empty() {
        return Err(AuthError::InvalidToken);
    }

    Ok(token)
}
