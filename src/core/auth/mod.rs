//! Authentication module for StudyHub
//!
//! This module provides authentication functionality including:
//! - Token claims and the unverified client-side payload decoder
//! - JWT token generation and validation (server)
//! - User registration and login against the in-memory user store
//! - REST API endpoints for auth operations

pub mod claims;

#[cfg(feature = "ssr")]
pub mod api;
#[cfg(feature = "ssr")]
pub mod jwt;
#[cfg(feature = "ssr")]
pub mod service;

pub use claims::{Claims, DecodeError, Role, decode_claims};

#[cfg(feature = "ssr")]
pub use api::{ApiError, AuthApiState, auth_api_router};
#[cfg(feature = "ssr")]
pub use jwt::{JwtConfig, JwtError, JwtService};
#[cfg(feature = "ssr")]
pub use service::{
    AuthError, AuthService, LoginRequest, LoginResponse, RegisterRequest, UserProfile, UserStore,
};
