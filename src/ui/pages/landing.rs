//! Landing page.
//!
//! Entry point for anonymous visitors; an established session is forwarded
//! straight to its role's dashboard.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::ui::auth::use_auth_context;

/// Landing page component
#[component]
pub fn LandingPage() -> impl IntoView {
    let auth = use_auth_context();

    // Skip the landing page for signed-in users
    Effect::new(move |_| {
        if let Some(role) = auth.role() {
            let navigate = use_navigate();
            navigate(role.home_path(), Default::default());
        }
    });

    view! {
        <div class="landing">
            <header class="landing-header">
                <span class="landing-logo">"StudyHub"</span>
            </header>

            <main class="landing-main">
                <h1>"Learn. Teach. Manage."</h1>
                <p>
                    "StudyHub brings students, instructors, and administrators "
                    "together on one platform."
                </p>

                <div class="landing-actions">
                    <A href="/login" attr:class="landing-cta">
                        "Sign In"
                    </A>
                    <A href="/signup" attr:class="landing-cta landing-cta-secondary">
                        "Create an Account"
                    </A>
                </div>
            </main>
        </div>
    }
}
