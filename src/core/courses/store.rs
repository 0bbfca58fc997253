//! In-memory course store.
//!
//! Courses are owned by the instructor that created them; every mutating
//! operation is scoped to the owner. A lookup that finds a course owned by
//! someone else reports `NotFound`, never the course's existence.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

/// Maximum accepted title length after trimming
const MAX_TITLE_LEN: usize = 255;

/// Maximum accepted description length after trimming
const MAX_DESCRIPTION_LEN: usize = 1000;

/// Course store error types
#[derive(Debug, thiserror::Error)]
pub enum CourseError {
    #[error("Course not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),
}

/// A stored course
#[derive(Debug, Clone, serde::Serialize)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Username of the owning instructor
    pub instructor: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for a course
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CoursePayload {
    pub title: String,
    pub description: String,
}

impl CoursePayload {
    /// Trim and length-check the payload, returning the sanitized fields.
    fn sanitize(&self) -> Result<(String, String), CourseError> {
        let title = self.title.trim();
        let description = self.description.trim();

        if title.is_empty() {
            return Err(CourseError::Validation("Title must not be empty".to_string()));
        }
        if title.len() > MAX_TITLE_LEN {
            return Err(CourseError::Validation(format!(
                "Title must be at most {MAX_TITLE_LEN} characters"
            )));
        }
        if description.is_empty() {
            return Err(CourseError::Validation(
                "Description must not be empty".to_string(),
            ));
        }
        if description.len() > MAX_DESCRIPTION_LEN {
            return Err(CourseError::Validation(format!(
                "Description must be at most {MAX_DESCRIPTION_LEN} characters"
            )));
        }

        Ok((title.to_string(), description.to_string()))
    }
}

/// In-memory course store
#[derive(Clone, Default)]
pub struct CourseStore {
    courses: Arc<DashMap<Uuid, Course>>,
}

impl CourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a course owned by `instructor`.
    pub fn create(&self, instructor: &str, payload: &CoursePayload) -> Result<Course, CourseError> {
        let (title, description) = payload.sanitize()?;

        let now = Utc::now();
        let course = Course {
            id: Uuid::new_v4(),
            title,
            description,
            instructor: instructor.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.courses.insert(course.id, course.clone());

        Ok(course)
    }

    /// Fetch a course owned by `instructor`. Courses owned by others are
    /// indistinguishable from missing ones.
    pub fn get_owned(&self, id: Uuid, instructor: &str) -> Result<Course, CourseError> {
        self.courses
            .get(&id)
            .filter(|course| course.instructor == instructor)
            .map(|course| course.clone())
            .ok_or(CourseError::NotFound)
    }

    /// Update a course owned by `instructor`.
    pub fn update(
        &self,
        id: Uuid,
        instructor: &str,
        payload: &CoursePayload,
    ) -> Result<Course, CourseError> {
        let (title, description) = payload.sanitize()?;

        let mut entry = self
            .courses
            .get_mut(&id)
            .filter(|course| course.instructor == instructor)
            .ok_or(CourseError::NotFound)?;

        entry.title = title;
        entry.description = description;
        entry.updated_at = Utc::now();

        Ok(entry.clone())
    }

    /// Delete a course owned by `instructor`.
    pub fn delete(&self, id: Uuid, instructor: &str) -> Result<(), CourseError> {
        let owned = self
            .courses
            .get(&id)
            .map(|course| course.instructor == instructor)
            .unwrap_or(false);

        if !owned {
            return Err(CourseError::NotFound);
        }

        self.courses.remove(&id);
        Ok(())
    }

    /// All courses owned by `instructor`, newest first.
    pub fn by_instructor(&self, instructor: &str) -> Vec<Course> {
        let mut courses: Vec<Course> = self
            .courses
            .iter()
            .filter(|entry| entry.instructor == instructor)
            .map(|entry| entry.clone())
            .collect();
        courses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        courses
    }

    /// Every course in the system, newest first.
    pub fn all(&self) -> Vec<Course> {
        let mut courses: Vec<Course> = self.courses.iter().map(|entry| entry.clone()).collect();
        courses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        courses
    }

    /// Number of courses owned by `instructor`.
    pub fn count_for(&self, instructor: &str) -> usize {
        self.courses
            .iter()
            .filter(|entry| entry.instructor == instructor)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(title: &str, description: &str) -> CoursePayload {
        CoursePayload {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    // ========================================================================
    // CRUD Tests
    // ========================================================================

    #[test]
    fn test_create_and_get() {
        let store = CourseStore::new();

        let course = store
            .create("teach1", &payload("Rust 101", "Introduction to Rust"))
            .unwrap();

        let fetched = store.get_owned(course.id, "teach1").unwrap();
        assert_eq!(fetched.title, "Rust 101");
        assert_eq!(fetched.description, "Introduction to Rust");
        assert_eq!(fetched.instructor, "teach1");
    }

    #[test]
    fn test_create_trims_input() {
        let store = CourseStore::new();

        let course = store
            .create("teach1", &payload("  Rust 101  ", "  desc  "))
            .unwrap();

        assert_eq!(course.title, "Rust 101");
        assert_eq!(course.description, "desc");
    }

    #[test]
    fn test_update() {
        let store = CourseStore::new();
        let course = store.create("teach1", &payload("Old", "Old desc")).unwrap();

        let updated = store
            .update(course.id, "teach1", &payload("New", "New desc"))
            .unwrap();

        assert_eq!(updated.title, "New");
        assert_eq!(updated.description, "New desc");
        assert!(updated.updated_at >= course.updated_at);
    }

    #[test]
    fn test_delete() {
        let store = CourseStore::new();
        let course = store.create("teach1", &payload("Doomed", "gone soon")).unwrap();

        store.delete(course.id, "teach1").unwrap();

        assert!(matches!(
            store.get_owned(course.id, "teach1"),
            Err(CourseError::NotFound)
        ));
    }

    // ========================================================================
    // Ownership Tests
    // ========================================================================

    #[test]
    fn test_other_instructor_sees_not_found() {
        let store = CourseStore::new();
        let course = store.create("teach1", &payload("Mine", "private")).unwrap();

        assert!(matches!(
            store.get_owned(course.id, "teach2"),
            Err(CourseError::NotFound)
        ));
        assert!(matches!(
            store.update(course.id, "teach2", &payload("Stolen", "nope")),
            Err(CourseError::NotFound)
        ));
        assert!(matches!(
            store.delete(course.id, "teach2"),
            Err(CourseError::NotFound)
        ));

        // Untouched by the failed attempts
        let fetched = store.get_owned(course.id, "teach1").unwrap();
        assert_eq!(fetched.title, "Mine");
    }

    #[test]
    fn test_by_instructor_and_all() {
        let store = CourseStore::new();
        store.create("teach1", &payload("A", "a")).unwrap();
        store.create("teach1", &payload("B", "b")).unwrap();
        store.create("teach2", &payload("C", "c")).unwrap();

        assert_eq!(store.by_instructor("teach1").len(), 2);
        assert_eq!(store.by_instructor("teach2").len(), 1);
        assert_eq!(store.by_instructor("teach3").len(), 0);
        assert_eq!(store.all().len(), 3);
        assert_eq!(store.count_for("teach1"), 2);
    }

    // ========================================================================
    // Validation Tests
    // ========================================================================

    #[test]
    fn test_rejects_empty_fields() {
        let store = CourseStore::new();

        assert!(matches!(
            store.create("teach1", &payload("", "desc")),
            Err(CourseError::Validation(_))
        ));
        assert!(matches!(
            store.create("teach1", &payload("   ", "desc")),
            Err(CourseError::Validation(_))
        ));
        assert!(matches!(
            store.create("teach1", &payload("title", "")),
            Err(CourseError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_fields() {
        let store = CourseStore::new();

        let long_title = "t".repeat(MAX_TITLE_LEN + 1);
        assert!(matches!(
            store.create("teach1", &payload(&long_title, "desc")),
            Err(CourseError::Validation(_))
        ));

        let long_description = "d".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(matches!(
            store.create("teach1", &payload("title", &long_description)),
            Err(CourseError::Validation(_))
        ));

        // Boundary values are accepted
        let max_title = "t".repeat(MAX_TITLE_LEN);
        let max_description = "d".repeat(MAX_DESCRIPTION_LEN);
        assert!(store.create("teach1", &payload(&max_title, &max_description)).is_ok());
    }
}
