//! Core domain logic: authentication, course management, and server
//! configuration.

pub mod auth;

#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod courses;
