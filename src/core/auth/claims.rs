//! Token claims and the unverified payload decoder.
//!
//! The client never verifies token signatures: the backend issued the token
//! and HTTPS protects it in transit, so the browser side only needs to read
//! the payload (subject, role, expiry). Signature verification stays a server
//! responsibility in `jwt.rs`.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};

/// User role carried in the `user_type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Instructor,
    Admin,
}

impl Role {
    /// The dashboard route this role is authorized for.
    pub fn home_path(self) -> &'static str {
        match self {
            Role::Student => "/student-home",
            Role::Instructor => "/instructor-home",
            Role::Admin => "/admin-home",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Instructor => "instructor",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "instructor" => Ok(Role::Instructor),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

/// JWT claims structure shared by the server (signing) and client (decoding).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (unique user handle)
    pub sub: String,
    /// User role
    pub user_type: Role,
    /// User email, when the issuer included it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issuer
    #[serde(default)]
    pub iss: String,
}

impl Claims {
    /// Strict expiry check: a token expiring at exactly `now` is expired.
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp <= now
    }
}

/// Errors from decoding a token payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("token is not a three-segment JWT")]
    InvalidFormat,

    #[error("token payload is not valid base64url: {0}")]
    InvalidEncoding(String),

    #[error("token payload is not a valid claims object: {0}")]
    InvalidPayload(String),
}

/// Decode the claims of a JWT without verifying its signature.
///
/// Pure function: same token in, same claims out. Fails only on syntactic
/// problems (segment count, base64url encoding, payload structure).
pub fn decode_claims(token: &str) -> Result<Claims, DecodeError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(DecodeError::InvalidFormat);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| DecodeError::InvalidEncoding(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| DecodeError::InvalidPayload(e.to_string()))
}
