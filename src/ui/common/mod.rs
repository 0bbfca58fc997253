//! Shared UI building blocks.

mod spinner;

pub use spinner::{LoadingSpinner, Spinner};
