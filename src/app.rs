//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::ui::auth::provide_auth_context;
use crate::ui::notifications::{NotificationsContainer, provide_notifications};
use crate::ui::pages::{
    AdminHomePage, InstructorHomePage, LandingPage, LoginPage, SignupPage, StudentHomePage,
};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the notification and auth contexts and sets up client-side
/// routing. Unknown routes redirect to the landing page.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let notifications = provide_notifications();
    let _auth = provide_auth_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/studyhub.css"/>

        <Title text="StudyHub - Learning Management"/>

        <NotificationsContainer manager=notifications />

        <Router>
            <Routes fallback=|| view! { <Redirect path="/" /> }>
                <Route path=StaticSegment("") view=LandingPage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("signup") view=SignupPage/>
                <Route path=StaticSegment("student-home") view=StudentHomePage/>
                <Route path=StaticSegment("instructor-home") view=InstructorHomePage/>
                <Route path=StaticSegment("admin-home") view=AdminHomePage/>
            </Routes>
        </Router>
    }
}
