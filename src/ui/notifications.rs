//! Toast notifications.
//!
//! Auth operations report their outcome here: login/registration success or
//! failure, and logout. Provided via context so any component (and the auth
//! flows themselves) can emit without prop drilling.

use leptos::prelude::*;
use std::collections::VecDeque;

/// Maximum number of notifications to show at once
const MAX_NOTIFICATIONS: usize = 5;

/// Default auto-dismiss delay in milliseconds
const AUTO_DISMISS_MS: u32 = 5000;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    fn class(self) -> &'static str {
        match self {
            NotificationKind::Success => "toast toast-success",
            NotificationKind::Error => "toast toast-error",
            NotificationKind::Info => "toast toast-info",
        }
    }
}

/// A single notification
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub auto_dismiss_ms: Option<u32>,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            message: message.into(),
            auto_dismiss_ms: Some(AUTO_DISMISS_MS),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            message: message.into(),
            // Errors stay until dismissed
            auto_dismiss_ms: None,
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            title: title.into(),
            message: message.into(),
            auto_dismiss_ms: Some(AUTO_DISMISS_MS),
        }
    }
}

/// Notification item with unique ID for tracking
#[derive(Clone, Debug)]
pub struct NotificationItem {
    pub id: u64,
    pub notification: Notification,
}

/// Manager handing out and retiring notifications
#[derive(Clone, Copy)]
pub struct NotificationManager {
    notifications: RwSignal<VecDeque<NotificationItem>>,
    next_id: RwSignal<u64>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            notifications: RwSignal::new(VecDeque::new()),
            next_id: RwSignal::new(0),
        }
    }

    /// Get the notifications signal for the container
    pub fn notifications(&self) -> RwSignal<VecDeque<NotificationItem>> {
        self.notifications
    }

    /// Add a notification
    pub fn notify(&self, notification: Notification) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        self.notifications.update(|items| {
            items.push_back(NotificationItem { id, notification });

            // Retire the oldest past the cap
            while items.len() > MAX_NOTIFICATIONS {
                items.pop_front();
            }
        });
    }

    pub fn success(&self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(Notification::success(title, message));
    }

    pub fn error(&self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(Notification::error(title, message));
    }

    pub fn info(&self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(Notification::info(title, message));
    }

    /// Remove a notification by id
    pub fn dismiss(&self, id: u64) {
        self.notifications.update(|items| {
            items.retain(|item| item.id != id);
        });
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Provide the notification manager to the component tree
pub fn provide_notifications() -> NotificationManager {
    let manager = NotificationManager::new();
    provide_context(manager);
    manager
}

/// Get the notification manager from the component tree
pub fn use_notifications() -> NotificationManager {
    expect_context::<NotificationManager>()
}

/// Notifications container component, rendered once at the app root
#[component]
pub fn NotificationsContainer(manager: NotificationManager) -> impl IntoView {
    view! {
        <div class="toast-stack">
            {move || {
                manager.notifications().get().into_iter().map(|item| {
                    view! {
                        <NotificationToast
                            notification=item.notification.clone()
                            id=item.id
                            manager=manager
                        />
                    }
                }).collect_view()
            }}
        </div>
    }
}

/// Single notification toast
#[component]
fn NotificationToast(
    notification: Notification,
    id: u64,
    manager: NotificationManager,
) -> impl IntoView {
    // Auto-dismiss if specified
    if let Some(_ms) = notification.auto_dismiss_ms {
        #[cfg(not(feature = "ssr"))]
        {
            use gloo_timers::future::TimeoutFuture;
            use wasm_bindgen_futures::spawn_local;

            spawn_local(async move {
                TimeoutFuture::new(_ms).await;
                manager.dismiss(id);
            });
        }
    }

    let title = notification.title.clone();
    let message = notification.message.clone();

    view! {
        <div class=notification.kind.class() role="status">
            <div class="toast-body">
                <h4 class="toast-title">{title}</h4>
                <p class="toast-message">{message}</p>
            </div>
            <button
                class="toast-dismiss"
                on:click=move |_| manager.dismiss(id)
            >
                "\u{2715}"
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Notification Constructor Tests
    // ========================================================================

    #[test]
    fn test_success_auto_dismisses() {
        let notification = Notification::success("Signed in", "Welcome back");

        assert_eq!(notification.kind, NotificationKind::Success);
        assert_eq!(notification.title, "Signed in");
        assert_eq!(notification.auto_dismiss_ms, Some(AUTO_DISMISS_MS));
    }

    #[test]
    fn test_error_stays_until_dismissed() {
        let notification = Notification::error("Sign-in failed", "Invalid credentials");

        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(notification.auto_dismiss_ms, None);
    }

    #[test]
    fn test_kind_classes_differ() {
        assert_ne!(
            NotificationKind::Success.class(),
            NotificationKind::Error.class()
        );
        assert_ne!(
            NotificationKind::Error.class(),
            NotificationKind::Info.class()
        );
    }
}
