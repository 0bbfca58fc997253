//! Signup page component

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::core::auth::claims::Role;
use crate::ui::auth::{RegisterForm, use_auth_context};

/// Signup page component
#[component]
pub fn SignupPage() -> impl IntoView {
    let auth = use_auth_context();

    // Redirect if already authenticated
    Effect::new(move |_| {
        if let Some(role) = auth.role() {
            let navigate = use_navigate();
            navigate(role.home_path(), Default::default());
        }
    });

    // Registration signs the account in, so route straight to the dashboard
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
                <RegisterForm on_success=on_success />

                <p class="auth-page-switch">
                    "Already have an account? "
                    <A href="/login">"Sign in"</A>
                </p>
            </main>
        </div>
    }
}
