//! Login form component
//!
//! Collects username and password, validates locally, and drives the login
//! flow. While a request is in flight the submit button is disabled so the
//! form cannot be submitted twice.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::context::{login, use_auth_context};
use crate::core::auth::claims::Role;

/// Login form component
#[component]
pub fn LoginForm(
    /// Callback when login is successful, carrying the session role
    #[prop(into)]
    on_success: Callback<Role>,
) -> impl IntoView {
    let auth = use_auth_context();

    // Form state
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    // Form validation
    let username_error = RwSignal::new(None::<String>);
    let password_error = RwSignal::new(None::<String>);

    let validate_username = move || {
        if username.get().trim().is_empty() {
            username_error.set(Some("Username is required".to_string()));
            false
        } else {
            username_error.set(None);
            true
        }
    };

    let validate_password = move || {
        if password.get().is_empty() {
            password_error.set(Some("Password is required".to_string()));
            false
        } else {
            password_error.set(None);
            true
        }
    };

    // Handle form submission
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        // A request is already in flight; ignore the resubmission
        if auth.loading.get_untracked() {
            return;
        }

        auth.clear_error();

        let username_valid = validate_username();
        let password_valid = validate_password();

        if !username_valid || !password_valid {
            return;
        }

        let username_val = username.get();
        let password_val = password.get();

        spawn_local(async move {
            if let Ok(role) = login(&username_val, &password_val).await {
                on_success.run(role);
            }
            // Failure is already in the auth context and notifications
        });
    };

    view! {
        <form on:submit=on_submit class="auth-form">
            <div class="auth-form-header">
                <h2>"Welcome Back"</h2>
                <p>"Sign in to your account to continue"</p>
            </div>

            // Global error message
            {move || {
                auth.error.get().map(|error| {
                    view! {
                        <div class="auth-form-error">
                            <p>{error}</p>
                        </div>
                    }
                })
            }}

            // Username field
            <div class="auth-form-field">
                <label for="username">"Username"</label>
                <input
                    type="text"
                    id="username"
                    name="username"
                    autocomplete="username"
                    placeholder="Your username"
                    class:input-invalid=move || username_error.get().is_some()
                    prop:value=move || username.get()
                    on:input=move |ev| {
                        username.set(event_target_value(&ev));
                        username_error.set(None);
                    }
                    on:blur=move |_| { validate_username(); }
                />
                {move || {
                    username_error.get().map(|error| {
                        view! { <p class="field-error">{error}</p> }
                    })
                }}
            </div>

            // Password field
            <div class="auth-form-field">
                <label for="password">"Password"</label>
                <input
                    type="password"
                    id="password"
                    name="password"
                    autocomplete="current-password"
                    placeholder="Enter your password"
                    class:input-invalid=move || password_error.get().is_some()
                    prop:value=move || password.get()
                    on:input=move |ev| {
                        password.set(event_target_value(&ev));
                        password_error.set(None);
                    }
                    on:blur=move |_| { validate_password(); }
                />
                {move || {
                    password_error.get().map(|error| {
                        view! { <p class="field-error">{error}</p> }
                    })
                }}
            </div>

            // Submit button, disabled while the request is in flight
            <button
                type="submit"
                class="auth-form-submit"
                disabled=move || auth.loading.get()
            >
                {move || {
                    if auth.loading.get() {
                        "Signing in..."
                    } else {
                        "Sign In"
                    }
                }}
            </button>
        </form>
    }
}
