//! Client-side UI: authentication flows, pages, and shared components.

pub mod auth;
pub mod auth_utils;
pub mod common;
pub mod courses_client;
pub mod notifications;
pub mod pages;
