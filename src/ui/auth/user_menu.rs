//! User menu shown in the header of the dashboard pages: the signed-in
//! identity, the role badge, and the sign-out control.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::context::{logout, use_auth_context};

/// User menu component
#[component]
pub fn UserMenu() -> impl IntoView {
    let auth = use_auth_context();

    let on_logout = move |_| {
        logout();
        let navigate = use_navigate();
        navigate("/login", Default::default());
    };

    view! {
        {move || {
            auth.session().map(|session| {
                view! {
                    <div class="user-menu">
                        <span class="user-menu-name">{session.username.clone()}</span>
                        <span class="user-menu-role">{session.role.as_str()}</span>
                        {session.email.clone().map(|email| {
                            view! { <span class="user-menu-email">{email}</span> }
                        })}
                        <button class="user-menu-logout" on:click=on_logout>
                            "Sign out"
                        </button>
                    </div>
                }
            })
        }}
    }
}
