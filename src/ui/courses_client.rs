//! Client for the instructor REST surface.
//!
//! Every call attaches the stored bearer token. Failures surface the
//! backend's `detail` message when one is present so the UI can show it
//! verbatim; 401/403 responses are not retried, the route guard handles
//! getting the user back to the right place.

use serde::{Deserialize, Serialize};

/// A course as the backend serializes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Create/update payload for a course
#[derive(Debug, Clone, Serialize)]
pub struct CoursePayload {
    pub title: String,
    pub description: String,
}

/// The instructor's stored profile
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InstructorProfile {
    pub username: String,
    pub email: String,
    pub user_type: String,
}

/// Dashboard statistics for the instructor
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InstructorDashboard {
    pub instructor: String,
    pub total_courses: usize,
}

/// GET /api/v1/instructor/profile
#[cfg(not(feature = "ssr"))]
pub async fn fetch_profile() -> Result<InstructorProfile, String> {
    let json = request("GET", "/api/v1/instructor/profile", None).await?;
    serde_wasm_bindgen::from_value(json).map_err(|e| e.to_string())
}

/// GET /api/v1/instructor/dashboard
#[cfg(not(feature = "ssr"))]
pub async fn fetch_dashboard() -> Result<InstructorDashboard, String> {
    let json = request("GET", "/api/v1/instructor/dashboard", None).await?;
    serde_wasm_bindgen::from_value(json).map_err(|e| e.to_string())
}

/// POST /api/v1/instructor/courses/create
#[cfg(not(feature = "ssr"))]
pub async fn create_course(payload: &CoursePayload) -> Result<Course, String> {
    let body = serde_json::to_string(payload).map_err(|e| e.to_string())?;
    let json = request("POST", "/api/v1/instructor/courses/create", Some(body)).await?;
    serde_wasm_bindgen::from_value(json).map_err(|e| e.to_string())
}

/// GET /api/v1/instructor/courses/my-courses
#[cfg(not(feature = "ssr"))]
pub async fn fetch_my_courses() -> Result<Vec<Course>, String> {
    let json = request("GET", "/api/v1/instructor/courses/my-courses", None).await?;
    serde_wasm_bindgen::from_value(json).map_err(|e| e.to_string())
}

/// GET /api/v1/instructor/courses/course/{id}
#[cfg(not(feature = "ssr"))]
pub async fn fetch_course(id: &str) -> Result<Course, String> {
    let path = format!("/api/v1/instructor/courses/course/{id}");
    let json = request("GET", &path, None).await?;
    serde_wasm_bindgen::from_value(json).map_err(|e| e.to_string())
}

/// PUT /api/v1/instructor/courses/course/{id}
#[cfg(not(feature = "ssr"))]
pub async fn update_course(id: &str, payload: &CoursePayload) -> Result<Course, String> {
    let body = serde_json::to_string(payload).map_err(|e| e.to_string())?;
    let path = format!("/api/v1/instructor/courses/course/{id}");
    let json = request("PUT", &path, Some(body)).await?;
    serde_wasm_bindgen::from_value(json).map_err(|e| e.to_string())
}

/// DELETE /api/v1/instructor/courses/course/{id}
#[cfg(not(feature = "ssr"))]
pub async fn delete_course(id: &str) -> Result<(), String> {
    let path = format!("/api/v1/instructor/courses/course/{id}");
    request("DELETE", &path, None).await?;
    Ok(())
}

/// GET /api/v1/instructor/courses/all-courses
#[cfg(not(feature = "ssr"))]
pub async fn fetch_all_courses() -> Result<Vec<Course>, String> {
    let json = request("GET", "/api/v1/instructor/courses/all-courses", None).await?;
    serde_wasm_bindgen::from_value(json).map_err(|e| e.to_string())
}

/// Issue an authenticated request and return the parsed response JSON.
#[cfg(not(feature = "ssr"))]
async fn request(
    method: &str,
    path: &str,
    body: Option<String>,
) -> Result<wasm_bindgen::JsValue, String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    use crate::ui::auth_utils::add_auth_header;

    let window = web_sys::window().ok_or("No window")?;

    let opts = RequestInit::new();
    opts.set_method(method);
    if let Some(body) = body {
        opts.set_body(&body.into());
    }

    let req = Request::new_with_str_and_init(path, &opts).map_err(|e| format!("{:?}", e))?;

    req.headers()
        .set("Content-Type", "application/json")
        .map_err(|e| format!("{:?}", e))?;
    add_auth_header(&req)?;

    let resp_value = JsFuture::from(window.fetch_with_request(&req))
        .await
        .map_err(|e| format!("{:?}", e))?;

    let resp: Response = resp_value.dyn_into().map_err(|e| format!("{:?}", e))?;

    let status = resp.status();
    let json = match resp.json() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .unwrap_or(wasm_bindgen::JsValue::NULL),
        Err(_) => wasm_bindgen::JsValue::NULL,
    };

    if resp.ok() {
        Ok(json)
    } else {
        #[derive(Deserialize)]
        struct ErrorBody {
            #[serde(default)]
            detail: String,
        }

        match serde_wasm_bindgen::from_value::<ErrorBody>(json) {
            Ok(body) if !body.detail.is_empty() => Err(body.detail),
            _ => Err(format!("Request failed with status {status}")),
        }
    }
}

// SSR stubs - the instructor surface is only reachable from the browser

#[cfg(feature = "ssr")]
pub async fn fetch_profile() -> Result<InstructorProfile, String> {
    Err("Not available on server".to_string())
}

#[cfg(feature = "ssr")]
pub async fn fetch_dashboard() -> Result<InstructorDashboard, String> {
    Err("Not available on server".to_string())
}

#[cfg(feature = "ssr")]
pub async fn create_course(_payload: &CoursePayload) -> Result<Course, String> {
    Err("Not available on server".to_string())
}

#[cfg(feature = "ssr")]
pub async fn fetch_my_courses() -> Result<Vec<Course>, String> {
    Err("Not available on server".to_string())
}

#[cfg(feature = "ssr")]
pub async fn fetch_course(_id: &str) -> Result<Course, String> {
    Err("Not available on server".to_string())
}

#[cfg(feature = "ssr")]
pub async fn update_course(_id: &str, _payload: &CoursePayload) -> Result<Course, String> {
    Err("Not available on server".to_string())
}

#[cfg(feature = "ssr")]
pub async fn delete_course(_id: &str) -> Result<(), String> {
    Err("Not available on server".to_string())
}

#[cfg(feature = "ssr")]
pub async fn fetch_all_courses() -> Result<Vec<Course>, String> {
    Err("Not available on server".to_string())
}
