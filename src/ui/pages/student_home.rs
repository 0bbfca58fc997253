//! Student dashboard.
//!
//! Consumes the session state behind the route guard; course browsing and
//! enrollment live on other surfaces.

use leptos::prelude::*;

use crate::core::auth::claims::Role;
use crate::ui::auth::{RequireRole, UserMenu, use_auth_context};

/// Student dashboard page
#[component]
pub fn StudentHomePage() -> impl IntoView {
    view! {
        <RequireRole role=Role::Student>
            <StudentDashboard />
        </RequireRole>
    }
}

#[component]
fn StudentDashboard() -> impl IntoView {
    let auth = use_auth_context();

    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <span class="dashboard-logo">"StudyHub"</span>
                <UserMenu />
            </header>

            <main class="dashboard-main">
                <h1>
                    {move || {
                        auth.session()
                            .map(|session| format!("Welcome, {}!", session.username))
                            .unwrap_or_default()
                    }}
                </h1>
                <p>"Your enrolled courses and assignments will appear here."</p>
            </main>
        </div>
    }
}
