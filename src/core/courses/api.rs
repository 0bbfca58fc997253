//! Instructor API endpoints.
//!
//! All routes require `Authorization: Bearer <token>`:
//! - `GET    /api/v1/instructor/profile`
//! - `GET    /api/v1/instructor/dashboard`
//! - `POST   /api/v1/instructor/courses/create`
//! - `GET    /api/v1/instructor/courses/my-courses`
//! - `GET    /api/v1/instructor/courses/course/{id}`
//! - `PUT    /api/v1/instructor/courses/course/{id}`
//! - `DELETE /api/v1/instructor/courses/course/{id}`
//! - `GET    /api/v1/instructor/courses/all-courses`
//!
//! Error codes: 401 invalid/missing token, 403 role mismatch, 404 course not
//! found or not owned by the caller.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::auth::api::{ApiError, extract_bearer_token};
use crate::core::auth::claims::{Claims, Role};
use crate::core::auth::service::{AuthError, AuthService, UserProfile};
use crate::core::courses::store::{Course, CourseError, CoursePayload, CourseStore};

/// Instructor API state
#[derive(Clone)]
pub struct CourseApiState {
    pub courses: CourseStore,
    pub auth_service: AuthService,
}

/// Unified error type for the instructor surface
#[derive(Debug, thiserror::Error)]
pub enum InstructorApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Course(#[from] CourseError),

    #[error("Only instructors can access this endpoint")]
    NotAnInstructor,
}

impl IntoResponse for InstructorApiError {
    fn into_response(self) -> Response {
        match self {
            InstructorApiError::Auth(err) => err.into_response(),
            InstructorApiError::Course(err) => {
                let status = match &err {
                    CourseError::NotFound => StatusCode::NOT_FOUND,
                    CourseError::Validation(_) => StatusCode::BAD_REQUEST,
                };
                (status, Json(ApiError::new(err.to_string()))).into_response()
            }
            InstructorApiError::NotAnInstructor => (
                StatusCode::FORBIDDEN,
                Json(ApiError::new(self.to_string())),
            )
                .into_response(),
        }
    }
}

/// Dashboard statistics for the current instructor
#[derive(Debug, Serialize)]
pub struct InstructorDashboard {
    pub instructor: String,
    pub total_courses: usize,
}

/// Response for a deleted course
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Create the instructor API router
pub fn instructor_api_router(state: CourseApiState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/api/v1/instructor/profile", get(profile_handler))
        .route("/api/v1/instructor/dashboard", get(dashboard_handler))
        .route(
            "/api/v1/instructor/courses/create",
            post(create_course_handler),
        )
        .route(
            "/api/v1/instructor/courses/my-courses",
            get(my_courses_handler),
        )
        .route(
            "/api/v1/instructor/courses/course/{id}",
            get(get_course_handler),
        )
        .route(
            "/api/v1/instructor/courses/course/{id}",
            put(update_course_handler),
        )
        .route(
            "/api/v1/instructor/courses/course/{id}",
            delete(delete_course_handler),
        )
        .route(
            "/api/v1/instructor/courses/all-courses",
            get(all_courses_handler),
        )
        .with_state(state)
}

/// Validate the bearer token and require the instructor role.
fn authorize_instructor(
    state: &CourseApiState,
    headers: &HeaderMap,
) -> Result<Claims, InstructorApiError> {
    let token = extract_bearer_token(headers)?;
    let claims = state.auth_service.validate_token(&token)?;

    if claims.user_type != Role::Instructor {
        return Err(InstructorApiError::NotAnInstructor);
    }

    Ok(claims)
}

/// GET /api/v1/instructor/profile
async fn profile_handler(
    State(state): State<Arc<CourseApiState>>,
    headers: HeaderMap,
) -> Result<Json<UserProfile>, InstructorApiError> {
    authorize_instructor(&state, &headers)?;

    let token = extract_bearer_token(&headers)?;
    let profile = state.auth_service.current_user(&token)?;

    Ok(Json(profile))
}

/// GET /api/v1/instructor/dashboard
async fn dashboard_handler(
    State(state): State<Arc<CourseApiState>>,
    headers: HeaderMap,
) -> Result<Json<InstructorDashboard>, InstructorApiError> {
    let claims = authorize_instructor(&state, &headers)?;

    let total_courses = state.courses.count_for(&claims.sub);

    Ok(Json(InstructorDashboard {
        instructor: claims.sub,
        total_courses,
    }))
}

/// POST /api/v1/instructor/courses/create
async fn create_course_handler(
    State(state): State<Arc<CourseApiState>>,
    headers: HeaderMap,
    Json(payload): Json<CoursePayload>,
) -> Result<(StatusCode, Json<Course>), InstructorApiError> {
    let claims = authorize_instructor(&state, &headers)?;

    let course = state.courses.create(&claims.sub, &payload)?;

    tracing::info!("Course created: {} by {}", course.id, claims.sub);

    Ok((StatusCode::CREATED, Json(course)))
}

/// GET /api/v1/instructor/courses/my-courses
async fn my_courses_handler(
    State(state): State<Arc<CourseApiState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Course>>, InstructorApiError> {
    let claims = authorize_instructor(&state, &headers)?;

    Ok(Json(state.courses.by_instructor(&claims.sub)))
}

/// GET /api/v1/instructor/courses/course/{id}
async fn get_course_handler(
    State(state): State<Arc<CourseApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>, InstructorApiError> {
    let claims = authorize_instructor(&state, &headers)?;

    Ok(Json(state.courses.get_owned(id, &claims.sub)?))
}

/// PUT /api/v1/instructor/courses/course/{id}
async fn update_course_handler(
    State(state): State<Arc<CourseApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<CoursePayload>,
) -> Result<Json<Course>, InstructorApiError> {
    let claims = authorize_instructor(&state, &headers)?;

    let course = state.courses.update(id, &claims.sub, &payload)?;

    tracing::info!("Course updated: {} by {}", course.id, claims.sub);

    Ok(Json(course))
}

/// DELETE /api/v1/instructor/courses/course/{id}
async fn delete_course_handler(
    State(state): State<Arc<CourseApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, InstructorApiError> {
    let claims = authorize_instructor(&state, &headers)?;

    state.courses.delete(id, &claims.sub)?;

    tracing::info!("Course deleted: {} by {}", id, claims.sub);

    Ok(Json(DeleteResponse {
        message: "Course deleted successfully".to_string(),
    }))
}

/// GET /api/v1/instructor/courses/all-courses
async fn all_courses_handler(
    State(state): State<Arc<CourseApiState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Course>>, InstructorApiError> {
    authorize_instructor(&state, &headers)?;

    Ok(Json(state.courses.all()))
}
