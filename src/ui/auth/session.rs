//! Session derivation.
//!
//! A session is never stored: it is recomputed from the current token
//! whenever the token changes, including at application start. The functions
//! here are pure so the whole policy is testable without a browser.

use crate::core::auth::claims::{Role, decode_claims};

/// The identity derived from a valid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub email: Option<String>,
}

/// Outcome of deriving a session from the stored token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derivation {
    /// No usable identity. `clear_store` is set when a stored token turned
    /// out to be malformed or expired and must be discarded.
    Anonymous { clear_store: bool },
    Active(Session),
}

/// Derive a session from the current token.
///
/// Policy, in order:
/// 1. no token -> anonymous;
/// 2. undecodable token -> anonymous, clear the store;
/// 3. `exp <= now` -> anonymous, clear the store (strict validity, no
///    clock-skew grace);
/// 4. otherwise the session mirrors the claims exactly.
pub fn derive_session(token: Option<&str>, now: i64) -> Derivation {
    let Some(token) = token else {
        return Derivation::Anonymous { clear_store: false };
    };

    let Ok(claims) = decode_claims(token) else {
        return Derivation::Anonymous { clear_store: true };
    };

    if claims.is_expired(now) {
        return Derivation::Anonymous { clear_store: true };
    }

    Derivation::Active(Session {
        id: claims.sub.clone(),
        username: claims.sub,
        role: claims.user_type,
        email: claims.email,
    })
}

/// Outcome of committing a freshly received login token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginCommit {
    /// The token is usable and the login may take effect.
    Committed(Session),
    /// A logout (or newer login) happened while the request was in flight;
    /// the response must not resurrect the old session.
    Superseded,
    /// The backend returned a token the client cannot use.
    RejectedToken,
}

/// Decide whether a login response may still take effect.
///
/// `started_generation` is the session generation captured when the request
/// was issued; `current_generation` is the generation now. They differ when
/// a logout or another login completed in between.
pub fn commit_login(
    token: &str,
    started_generation: u64,
    current_generation: u64,
    now: i64,
) -> LoginCommit {
    if started_generation != current_generation {
        return LoginCommit::Superseded;
    }

    match derive_session(Some(token), now) {
        Derivation::Active(session) => LoginCommit::Committed(session),
        Derivation::Anonymous { .. } => LoginCommit::RejectedToken,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::claims::test_tokens::{token_for, token_from_json};

    const NOW: i64 = 1_700_000_000;

    // ========================================================================
    // Derivation Tests
    // ========================================================================

    #[test]
    fn test_no_token_is_anonymous() {
        assert_eq!(
            derive_session(None, NOW),
            Derivation::Anonymous { clear_store: false }
        );
    }

    #[test]
    fn test_valid_token_yields_matching_session() {
        let token = token_for("alice", Role::Student, Some("alice@example.com"), NOW + 3600);

        let Derivation::Active(session) = derive_session(Some(&token), NOW) else {
            panic!("expected an active session");
        };

        assert_eq!(session.id, "alice");
        assert_eq!(session.username, "alice");
        assert_eq!(session.role, Role::Student);
        assert_eq!(session.email.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn test_malformed_token_clears_store() {
        assert_eq!(
            derive_session(Some("garbage"), NOW),
            Derivation::Anonymous { clear_store: true }
        );
        assert_eq!(
            derive_session(Some(&token_from_json("not json")), NOW),
            Derivation::Anonymous { clear_store: true }
        );
    }

    #[test]
    fn test_expired_token_clears_store() {
        // 10 seconds in the past
        let token = token_for("alice", Role::Student, None, NOW - 10);

        assert_eq!(
            derive_session(Some(&token), NOW),
            Derivation::Anonymous { clear_store: true }
        );
    }

    #[test]
    fn test_expiry_boundary_is_strict() {
        let expiring_now = token_for("alice", Role::Student, None, NOW);
        assert_eq!(
            derive_session(Some(&expiring_now), NOW),
            Derivation::Anonymous { clear_store: true },
            "a token expiring at exactly now is expired"
        );

        let one_second_left = token_for("alice", Role::Student, None, NOW + 1);
        assert!(matches!(
            derive_session(Some(&one_second_left), NOW),
            Derivation::Active(_)
        ));
    }

    #[test]
    fn test_derivation_is_pure() {
        let token = token_for("bob", Role::Instructor, None, NOW + 60);

        assert_eq!(
            derive_session(Some(&token), NOW),
            derive_session(Some(&token), NOW)
        );
    }

    // ========================================================================
    // Login Commit Tests
    // ========================================================================

    #[test]
    fn test_commit_login_same_generation() {
        let token = token_for("alice", Role::Student, None, NOW + 3600);

        let LoginCommit::Committed(session) = commit_login(&token, 3, 3, NOW) else {
            panic!("expected commit");
        };
        assert_eq!(session.role, Role::Student);
    }

    #[test]
    fn test_commit_login_after_logout_is_superseded() {
        // Logout bumped the generation while the request was in flight: the
        // response must not resurrect the session, valid token or not.
        let token = token_for("alice", Role::Student, None, NOW + 3600);

        assert_eq!(commit_login(&token, 3, 4, NOW), LoginCommit::Superseded);
    }

    #[test]
    fn test_commit_login_rejects_unusable_token() {
        assert_eq!(commit_login("garbage", 0, 0, NOW), LoginCommit::RejectedToken);

        let expired = token_for("alice", Role::Student, None, NOW - 1);
        assert_eq!(commit_login(&expired, 0, 0, NOW), LoginCommit::RejectedToken);
    }
}
