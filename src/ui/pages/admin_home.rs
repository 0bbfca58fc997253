//! Admin dashboard.
//!
//! Consumes the session state behind the route guard; user and privilege
//! management live on other surfaces.

use leptos::prelude::*;

use crate::core::auth::claims::Role;
use crate::ui::auth::{RequireRole, UserMenu, use_auth_context};

/// Admin dashboard page
#[component]
pub fn AdminHomePage() -> impl IntoView {
    view! {
        <RequireRole role=Role::Admin>
            <AdminDashboard />
        </RequireRole>
    }
}

#[component]
fn AdminDashboard() -> impl IntoView {
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
                            .map(|session| format!("Administration: {}", session.username))
                            .unwrap_or_default()
                    }}
                </h1>
                <p>"Platform management tools will appear here."</p>
            </main>
        </div>
    }
}
