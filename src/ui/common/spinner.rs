use leptos::prelude::*;

/// Loading spinner component
#[component]
pub fn Spinner(
    /// Additional CSS classes
    #[prop(default = String::new())]
    class: String,
) -> impl IntoView {
    let full_classes = if class.is_empty() {
        "spinner".to_string()
    } else {
        format!("spinner {}", class)
    };

    view! {
        <div class=full_classes role="status" aria-live="polite">
            <div class="spinner-circle"></div>
            <span class="sr-only">"Loading..."</span>
        </div>
    }
}

/// Centered loading spinner with an optional message.
///
/// Used as the route guard's neutral placeholder while the session is being
/// derived, so it must not reveal anything about the protected content.
#[component]
pub fn LoadingSpinner(
    /// Optional loading message
    #[prop(default = String::new())]
    message: String,
) -> impl IntoView {
    view! {
        <div class="spinner-container">
            <Spinner class="spinner-centered".to_string() />
            {(!message.is_empty()).then(|| view! {
                <div class="spinner-label">{message.clone()}</div>
            })}
        </div>
    }
}
