//! StudyHub - Learning Management Platform
//!
//! A web application with role-gated dashboards for students, instructors,
//! and administrators, built with Leptos and WebAssembly. The client keeps a
//! token-based session; the server exposes the auth and instructor course
//! REST APIs.

#![recursion_limit = "2048"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
