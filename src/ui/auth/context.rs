//! Auth context for managing user authentication state
//!
//! This module provides a reactive authentication context that:
//! - Restores the persisted token at startup and derives the session from it
//! - Handles login, registration, and logout flows
//! - Guards against a login response landing after a logout (generation
//!   counter)
//!
//! Components observe the session through the `phase` signal; every token
//! mutation goes through here, never around it.

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::auth::claims::Role;
use crate::ui::auth::session::Session;
#[cfg(not(feature = "ssr"))]
use crate::ui::auth::session::{Derivation, LoginCommit, commit_login, derive_session};
#[cfg(not(feature = "ssr"))]
use crate::ui::auth_utils;
#[cfg(not(feature = "ssr"))]
use crate::ui::notifications::use_notifications;

/// Authentication lifecycle of the client.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionPhase {
    /// Initial state, until the persisted token has been examined once
    #[default]
    Loading,
    /// No valid session
    Unauthenticated,
    /// A well-formed, unexpired token produced this session
    Authenticated(Session),
}

/// Errors surfaced by the client-side auth operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{0}")]
    Backend(String),

    #[error("{0}")]
    Validation(String),

    /// A logout or newer login happened while this request was in flight.
    #[error("Sign-in was superseded by a newer session action")]
    Superseded,
}

/// Registration failure, kept distinct from the failure of the follow-up
/// login call so callers can tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
    #[error("Registration failed: {0}")]
    Registration(AuthClientError),

    #[error("Account created, but sign-in failed: {0}")]
    Login(AuthClientError),
}

/// Auth context providing authentication state and actions
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// Current session phase
    pub phase: RwSignal<SessionPhase>,
    /// An auth request is in flight (drives the double-submit guard)
    pub loading: RwSignal<bool>,
    /// Error message from the last operation
    pub error: RwSignal<Option<String>>,
    /// Bumped on logout and committed logins; in-flight logins compare
    /// against it before taking effect
    generation: RwSignal<u64>,
}

impl AuthContext {
    /// Check if a session is currently established
    pub fn is_authenticated(&self) -> bool {
        matches!(self.phase.get(), SessionPhase::Authenticated(_))
    }

    /// Get the current session (if authenticated)
    pub fn session(&self) -> Option<Session> {
        match self.phase.get() {
            SessionPhase::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// Get the current role (if authenticated)
    pub fn role(&self) -> Option<Role> {
        self.session().map(|session| session.role)
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }
}

/// Provide auth context to the component tree
pub fn provide_auth_context() -> AuthContext {
    let ctx = AuthContext {
        phase: RwSignal::new(SessionPhase::Loading),
        loading: RwSignal::new(false),
        error: RwSignal::new(None),
        generation: RwSignal::new(0),
    };

    // Restore the session from the persisted token after hydration
    // (client-side only). The server renders the Loading placeholder.
    #[cfg(not(feature = "ssr"))]
    {
        let phase = ctx.phase;
        Effect::new(move |_| {
            let token = auth_utils::get_token();
            match derive_session(token.as_deref(), now_epoch_secs()) {
                Derivation::Active(session) => {
                    phase.set(SessionPhase::Authenticated(session));
                }
                Derivation::Anonymous { clear_store } => {
                    if clear_store {
                        let _ = auth_utils::clear_token();
                    }
                    phase.set(SessionPhase::Unauthenticated);
                }
            }
        });
    }

    provide_context(ctx);
    ctx
}

/// Get auth context from the component tree
pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Login request body
#[derive(Debug, Serialize)]
struct LoginRequest {
    username: String,
    password: String,
}

/// Registration request body
#[derive(Debug, Serialize)]
struct RegisterRequest {
    username: String,
    email: String,
    password: String,
    user_type: Role,
}

/// Login response body
#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
    #[allow(dead_code)]
    #[serde(default)]
    token_type: Option<String>,
    #[allow(dead_code)]
    #[serde(default)]
    user_type: Option<Role>,
    #[allow(dead_code)]
    #[serde(default)]
    username: Option<String>,
}

/// Error response body (`{"detail": "..."}`)
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: String,
}

/// The registration profile collected by the signup form.
#[derive(Debug, Clone)]
pub struct RegisterProfile {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[cfg(not(feature = "ssr"))]
fn now_epoch_secs() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

/// Log in with username and password.
///
/// On success the token is persisted, the session re-derived from it, and
/// the role returned for routing.
#[cfg(not(feature = "ssr"))]
pub async fn login(username: &str, password: &str) -> Result<Role, AuthClientError> {
    // Contexts must be captured before the first await point
    let auth = use_auth_context();
    let notifications = use_notifications();

    login_with(auth, notifications, username, password).await
}

#[cfg(not(feature = "ssr"))]
async fn login_with(
    auth: AuthContext,
    notifications: crate::ui::notifications::NotificationManager,
    username: &str,
    password: &str,
) -> Result<Role, AuthClientError> {
    let started_generation = auth.generation.get_untracked();
    auth.loading.set(true);
    auth.error.set(None);

    let result = if username.trim().is_empty() || password.is_empty() {
        Err(AuthClientError::Validation(
            "Username and password are required".to_string(),
        ))
    } else {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        post_json("/api/v1/auth/login", &request)
            .await
            .and_then(|response| {
                serde_wasm_bindgen::from_value::<LoginResponse>(response)
                    .map_err(|e| AuthClientError::Network(e.to_string()))
            })
    };

    auth.loading.set(false);

    let outcome = result.and_then(|response| {
        let current_generation = auth.generation.get_untracked();
        match commit_login(
            &response.access_token,
            started_generation,
            current_generation,
            now_epoch_secs(),
        ) {
            LoginCommit::Committed(session) => {
                if let Err(err) = auth_utils::set_token(&response.access_token) {
                    leptos::logging::warn!("Failed to persist token: {err}");
                }
                let role = session.role;
                notifications.success("Signed in", format!("Welcome back, {}.", session.username));
                auth.phase.set(SessionPhase::Authenticated(session));
                Ok(role)
            }
            LoginCommit::Superseded => Err(AuthClientError::Superseded),
            LoginCommit::RejectedToken => Err(AuthClientError::Backend(
                "The server returned an unusable token".to_string(),
            )),
        }
    });

    if let Err(ref error) = outcome {
        // A superseded login is not an error the user acted on; stay quiet.
        if *error != AuthClientError::Superseded {
            auth.error.set(Some(error.to_string()));
            notifications.error("Sign-in failed", error.to_string());
        }
    }

    outcome
}

#[cfg(feature = "ssr")]
pub async fn login(_username: &str, _password: &str) -> Result<Role, AuthClientError> {
    Err(AuthClientError::Network(
        "Login not available on server".to_string(),
    ))
}

/// Register a new account, then immediately log in with the same
/// credentials: the registration response carries no usable token.
#[cfg(not(feature = "ssr"))]
pub async fn register(profile: &RegisterProfile) -> Result<Role, RegisterError> {
    // Contexts must be captured before the first await point
    let auth = use_auth_context();
    let notifications = use_notifications();

    auth.loading.set(true);
    auth.error.set(None);

    let request = RegisterRequest {
        username: profile.username.clone(),
        email: profile.email.clone(),
        password: profile.password.clone(),
        user_type: profile.role,
    };
    let result = post_json("/api/v1/auth/register", &request).await;

    auth.loading.set(false);

    match result {
        Err(error) => {
            auth.error.set(Some(error.to_string()));
            notifications.error("Registration failed", error.to_string());
            Err(RegisterError::Registration(error))
        }
        Ok(_body) => {
            notifications.success("Account created", "Signing you in...");
            login_with(auth, notifications, &profile.username, &profile.password)
                .await
                .map_err(RegisterError::Login)
        }
    }
}

#[cfg(feature = "ssr")]
pub async fn register(_profile: &RegisterProfile) -> Result<Role, RegisterError> {
    Err(RegisterError::Registration(AuthClientError::Network(
        "Registration not available on server".to_string(),
    )))
}

/// Log out the current user.
///
/// Purely local: clears the token store, invalidates any in-flight login via
/// the generation counter, and publishes the unauthenticated phase. No
/// backend call is made.
#[cfg(not(feature = "ssr"))]
pub fn logout() {
    let auth = use_auth_context();
    let notifications = use_notifications();

    let _ = auth_utils::clear_token();
    auth.generation.update(|generation| *generation += 1);
    auth.phase.set(SessionPhase::Unauthenticated);
    auth.error.set(None);

    notifications.info("Signed out", "Your session has ended.");
}

#[cfg(feature = "ssr")]
pub fn logout() {}

/// POST a JSON body and return the parsed response JSON.
///
/// Transport failures map to `Network`; non-2xx responses map to `Backend`
/// carrying the server-supplied `detail` when present.
#[cfg(not(feature = "ssr"))]
async fn post_json(
    path: &str,
    body: &impl Serialize,
) -> Result<wasm_bindgen::JsValue, AuthClientError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    let network = |detail: String| AuthClientError::Network(detail);

    let window = web_sys::window().ok_or_else(|| network("No window".to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(
        &serde_json::to_string(body)
            .map_err(|e| network(e.to_string()))?
            .into(),
    );

    let request =
        Request::new_with_str_and_init(path, &opts).map_err(|e| network(format!("{:?}", e)))?;

    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| network(format!("{:?}", e)))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| network(format!("{:?}", e)))?;

    let resp: Response = resp_value
        .dyn_into()
        .map_err(|e| network(format!("{:?}", e)))?;

    let status = resp.status();
    let json = match resp.json() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .unwrap_or(wasm_bindgen::JsValue::NULL),
        Err(_) => wasm_bindgen::JsValue::NULL,
    };

    if resp.ok() {
        Ok(json)
    } else {
        Err(backend_error(status, &json))
    }
}

/// Map a non-2xx response to a `Backend` error, preferring the
/// server-supplied `detail` message.
#[cfg(not(feature = "ssr"))]
fn backend_error(status: u16, json: &wasm_bindgen::JsValue) -> AuthClientError {
    match serde_wasm_bindgen::from_value::<ErrorBody>(json.clone()) {
        Ok(body) if !body.detail.is_empty() => AuthClientError::Backend(body.detail),
        _ => AuthClientError::Backend(format!("Request failed with status {status}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // SessionPhase Tests
    // ========================================================================

    #[test]
    fn test_session_phase_default_is_loading() {
        assert_eq!(SessionPhase::default(), SessionPhase::Loading);
    }

    #[test]
    fn test_context_accessors() {
        let ctx = AuthContext {
            phase: RwSignal::new(SessionPhase::Authenticated(Session {
                id: "alice".to_string(),
                username: "alice".to_string(),
                role: Role::Student,
                email: None,
            })),
            loading: RwSignal::new(false),
            error: RwSignal::new(Some("old error".to_string())),
            generation: RwSignal::new(0),
        };

        assert!(ctx.is_authenticated());
        assert_eq!(ctx.role(), Some(Role::Student));
        assert_eq!(ctx.session().unwrap().username, "alice");

        ctx.clear_error();
        assert_eq!(ctx.error.get_untracked(), None);

        ctx.phase.set(SessionPhase::Unauthenticated);
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.role(), None);
    }

    // ========================================================================
    // Wire Format Tests
    // ========================================================================

    #[test]
    fn test_login_request_shape() {
        let request = LoginRequest {
            username: "alice".to_string(),
            password: "pw".to_string(),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"username":"alice","password":"pw"}"#);
    }

    #[test]
    fn test_register_request_shape() {
        let request = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "pw".to_string(),
            user_type: Role::Instructor,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""user_type":"instructor""#));
    }

    #[test]
    fn test_login_response_parsing() {
        let json = r#"{
            "access_token": "eyJhbGciOiJIUzI1NiJ9.payload.sig",
            "token_type": "bearer",
            "user_type": "student",
            "username": "alice"
        }"#;

        let response: LoginResponse = serde_json::from_str(json).unwrap();
        assert!(response.access_token.starts_with("eyJ"));
        assert_eq!(response.user_type, Some(Role::Student));
    }

    #[test]
    fn test_login_response_parsing_minimal() {
        // Only the token is required; the rest is advisory.
        let response: LoginResponse =
            serde_json::from_str(r#"{"access_token":"a.b.c"}"#).unwrap();
        assert_eq!(response.access_token, "a.b.c");
        assert_eq!(response.user_type, None);
    }

    #[test]
    fn test_error_body_parsing() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"Invalid credentials"}"#).unwrap();
        assert_eq!(body.detail, "Invalid credentials");

        let body: ErrorBody = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(body.detail, "");
    }

    // ========================================================================
    // Error Display Tests
    // ========================================================================

    #[test]
    fn test_auth_client_error_display() {
        assert_eq!(
            AuthClientError::Backend("Invalid credentials".to_string()).to_string(),
            "Invalid credentials"
        );
        assert_eq!(
            AuthClientError::Network("connection refused".to_string()).to_string(),
            "Network error: connection refused"
        );
    }

    #[test]
    fn test_register_error_distinguishes_phases() {
        let registration =
            RegisterError::Registration(AuthClientError::Backend("taken".to_string()));
        let login = RegisterError::Login(AuthClientError::Backend("bad password".to_string()));

        assert!(registration.to_string().starts_with("Registration failed"));
        assert!(login.to_string().starts_with("Account created, but sign-in failed"));
        assert_ne!(registration, login);
    }
}
