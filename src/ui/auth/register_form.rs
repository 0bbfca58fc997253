//! Register form component
//!
//! Collects username, email, password, and the account role. On success the
//! auth flow signs the new account in with the same credentials, so the
//! form's success callback fires with an established session.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::context::{RegisterProfile, register, use_auth_context};
use crate::core::auth::claims::Role;

/// Register form component
#[component]
pub fn RegisterForm(
    /// Callback when registration + sign-in succeeded, carrying the role
    #[prop(into)]
    on_success: Callback<Role>,
) -> impl IntoView {
    let auth = use_auth_context();

    // Form state
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Student);

    // Form validation
    let username_error = RwSignal::new(None::<String>);
    let email_error = RwSignal::new(None::<String>);
    let password_error = RwSignal::new(None::<String>);
    let confirm_error = RwSignal::new(None::<String>);

    let validate_username = move || {
        let value = username.get();
        let value = value.trim();
        if value.is_empty() {
            username_error.set(Some("Username is required".to_string()));
            false
        } else if value.len() < 3 {
            username_error.set(Some("Username must be at least 3 characters".to_string()));
            false
        } else if !value
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            username_error.set(Some(
                "Username can only contain letters, numbers, underscores, and hyphens".to_string(),
            ));
            false
        } else {
            username_error.set(None);
            true
        }
    };

    let validate_email = move || {
        let value = email.get();
        if value.is_empty() {
            email_error.set(Some("Email is required".to_string()));
            false
        } else if !value.contains('@') || !value.contains('.') {
            email_error.set(Some("Please enter a valid email".to_string()));
            false
        } else {
            email_error.set(None);
            true
        }
    };

    let validate_password = move || {
        let value = password.get();
        if value.is_empty() {
            password_error.set(Some("Password is required".to_string()));
            false
        } else if value.len() < 8 {
            password_error.set(Some("Password must be at least 8 characters".to_string()));
            false
        } else {
            password_error.set(None);
            true
        }
    };

    let validate_confirm = move || {
        if password.get() != confirm_password.get() {
            confirm_error.set(Some("Passwords do not match".to_string()));
            false
        } else {
            confirm_error.set(None);
            true
        }
    };

    // Handle form submission
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        if auth.loading.get_untracked() {
            return;
        }

        auth.clear_error();

        let valid = [
            validate_username(),
            validate_email(),
            validate_password(),
            validate_confirm(),
        ]
        .into_iter()
        .all(|ok| ok);

        if !valid {
            return;
        }

        let profile = RegisterProfile {
            username: username.get().trim().to_string(),
            email: email.get(),
            password: password.get(),
            role: role.get(),
        };

        spawn_local(async move {
            if let Ok(role) = register(&profile).await {
                on_success.run(role);
            }
        });
    };

    view! {
        <form on:submit=on_submit class="auth-form">
            <div class="auth-form-header">
                <h2>"Create Your Account"</h2>
                <p>"Join as a student, instructor, or administrator"</p>
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
                    placeholder="Pick a username"
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

            // Email field
            <div class="auth-form-field">
                <label for="email">"Email"</label>
                <input
                    type="email"
                    id="email"
                    name="email"
                    autocomplete="email"
                    placeholder="you@example.com"
                    class:input-invalid=move || email_error.get().is_some()
                    prop:value=move || email.get()
                    on:input=move |ev| {
                        email.set(event_target_value(&ev));
                        email_error.set(None);
                    }
                    on:blur=move |_| { validate_email(); }
                />
                {move || {
                    email_error.get().map(|error| {
                        view! { <p class="field-error">{error}</p> }
                    })
                }}
            </div>

            // Role select
            <div class="auth-form-field">
                <label for="role">"I am joining as"</label>
                <select
                    id="role"
                    name="role"
                    on:change=move |ev| {
                        role.set(
                            event_target_value(&ev)
                                .parse()
                                .unwrap_or(Role::Student),
                        );
                    }
                >
                    <option value="student" selected=move || role.get() == Role::Student>
                        "Student"
                    </option>
                    <option value="instructor" selected=move || role.get() == Role::Instructor>
                        "Instructor"
                    </option>
                    <option value="admin" selected=move || role.get() == Role::Admin>
                        "Administrator"
                    </option>
                </select>
            </div>

            // Password field
            <div class="auth-form-field">
                <label for="password">"Password"</label>
                <input
                    type="password"
                    id="password"
                    name="password"
                    autocomplete="new-password"
                    placeholder="At least 8 characters"
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

            // Confirm password field
            <div class="auth-form-field">
                <label for="confirm-password">"Confirm password"</label>
                <input
                    type="password"
                    id="confirm-password"
                    name="confirm-password"
                    autocomplete="new-password"
                    placeholder="Repeat your password"
                    class:input-invalid=move || confirm_error.get().is_some()
                    prop:value=move || confirm_password.get()
                    on:input=move |ev| {
                        confirm_password.set(event_target_value(&ev));
                        confirm_error.set(None);
                    }
                    on:blur=move |_| { validate_confirm(); }
                />
                {move || {
                    confirm_error.get().map(|error| {
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
                        "Creating account..."
                    } else {
                        "Sign Up"
                    }
                }}
            </button>
        </form>
    }
}
