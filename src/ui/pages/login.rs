//! Login page component
//!
//! A standalone page for signing in; on success the visitor is routed to
//! the home route matching their role.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::core::auth::claims::Role;
use crate::ui::auth::{LoginForm, use_auth_context};

/// Login page component
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth_context();

    // Redirect if already authenticated
    Effect::new(move |_| {
        if let Some(role) = auth.role() {
            let navigate = use_navigate();
            navigate(role.home_path(), Default::default());
        }
    });

    // Route to the role's dashboard after a successful login
    let on_success = move |role: Role| {
        let navigate = use_navigate();
        navigate(role.home_path(), Default::default());
    };

    view! {
        <div class="auth-page">
            <header class="auth-page-header">
                <A href="/" attr:class="auth-page-logo">
                    "StudyHub"
                </A>
            </header>

            <main class="auth-page-main">
                <LoginForm on_success=on_success />

                <p class="auth-page-switch">
                    "Don't have an account? "
                    <A href="/signup">"Sign up"</A>
                </p>
            </main>
        </div>
    }
}
