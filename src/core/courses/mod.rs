//! Course management: the in-memory course store and the instructor REST
//! surface built on top of it.

pub mod api;
pub mod store;

pub use api::{CourseApiState, InstructorApiError, instructor_api_router};
pub use store::{Course, CourseError, CoursePayload, CourseStore};
