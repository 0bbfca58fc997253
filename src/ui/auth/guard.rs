//! Route guard.
//!
//! Access to a protected view is decided by a four-state machine recomputed
//! from the session phase on every token change:
//!
//! - `Loading`           -> neutral placeholder, never protected content
//! - `Unauthenticated`   -> redirect to `/login`
//! - `WrongRole`         -> redirect to the session role's own home route
//! - `AuthorizedForRoute`-> render the protected content
//!
//! The decision itself is a pure function so the policy is testable without
//! rendering anything.

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::core::auth::claims::Role;
use crate::ui::auth::context::{SessionPhase, use_auth_context};
use crate::ui::common::LoadingSpinner;

/// Outcome of evaluating the guard for one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Session derivation has not completed yet
    Loading,
    /// No session: send the visitor to the login entry point
    Unauthenticated,
    /// Session exists but its role does not match; carries the actual role
    /// so the redirect can target its home route
    WrongRole(Role),
    /// Render the protected content
    AuthorizedForRoute,
}

/// Evaluate the guard for a session phase and an optional required role.
pub fn evaluate(phase: &SessionPhase, required: Option<Role>) -> GuardState {
    match phase {
        SessionPhase::Loading => GuardState::Loading,
        SessionPhase::Unauthenticated => GuardState::Unauthenticated,
        SessionPhase::Authenticated(session) => match required {
            Some(role) if session.role != role => GuardState::WrongRole(session.role),
            _ => GuardState::AuthorizedForRoute,
        },
    }
}

/// Wrap protected content behind the route guard.
///
/// With no `role`, any authenticated session is accepted.
#[component]
pub fn RequireRole(
    /// Role required to view the children
    #[prop(optional, into)]
    role: Option<Role>,
    children: ChildrenFn,
) -> impl IntoView {
    let auth = use_auth_context();

    move || match evaluate(&auth.phase.get(), role) {
        GuardState::Loading => view! {
            <LoadingSpinner message="Checking your session...".to_string() />
        }
        .into_any(),
        GuardState::Unauthenticated => view! { <Redirect path="/login" /> }.into_any(),
        GuardState::WrongRole(actual) => {
            view! { <Redirect path=actual.home_path() /> }.into_any()
        }
        GuardState::AuthorizedForRoute => children().into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::auth::session::Session;

    fn session(role: Role) -> SessionPhase {
        SessionPhase::Authenticated(Session {
            id: "alice".to_string(),
            username: "alice".to_string(),
            role,
            email: None,
        })
    }

    // ========================================================================
    // State Machine Tests
    // ========================================================================

    #[test]
    fn test_loading_never_authorizes() {
        assert_eq!(evaluate(&SessionPhase::Loading, None), GuardState::Loading);
        assert_eq!(
            evaluate(&SessionPhase::Loading, Some(Role::Admin)),
            GuardState::Loading
        );
    }

    #[test]
    fn test_unauthenticated_redirects_to_login() {
        assert_eq!(
            evaluate(&SessionPhase::Unauthenticated, None),
            GuardState::Unauthenticated
        );
        assert_eq!(
            evaluate(&SessionPhase::Unauthenticated, Some(Role::Student)),
            GuardState::Unauthenticated
        );
    }

    #[test]
    fn test_matching_role_is_authorized() {
        assert_eq!(
            evaluate(&session(Role::Student), Some(Role::Student)),
            GuardState::AuthorizedForRoute
        );
        assert_eq!(
            evaluate(&session(Role::Admin), Some(Role::Admin)),
            GuardState::AuthorizedForRoute
        );
    }

    #[test]
    fn test_no_required_role_accepts_any_session() {
        assert_eq!(
            evaluate(&session(Role::Instructor), None),
            GuardState::AuthorizedForRoute
        );
    }

    #[test]
    fn test_wrong_role_redirects_to_own_home() {
        let state = evaluate(&session(Role::Instructor), Some(Role::Student));
        assert_eq!(state, GuardState::WrongRole(Role::Instructor));

        // The redirect target is the actual role's home route
        let GuardState::WrongRole(actual) = state else {
            panic!("expected WrongRole");
        };
        assert_eq!(actual.home_path(), "/instructor-home");
    }

    #[test]
    fn test_guard_follows_phase_changes() {
        // Login then logout: the same required role yields different states.
        let required = Some(Role::Student);

        assert_eq!(
            evaluate(&session(Role::Student), required),
            GuardState::AuthorizedForRoute
        );
        assert_eq!(
            evaluate(&SessionPhase::Unauthenticated, required),
            GuardState::Unauthenticated
        );
    }
}
