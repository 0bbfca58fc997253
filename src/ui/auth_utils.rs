//! Token store for the frontend.
//!
//! Wraps the single localStorage slot that holds the current access token.
//! The slot is origin-scoped and survives page reloads; only logout (or an
//! expired/malformed token detected during session derivation) clears it.

/// Storage key for the access token in localStorage
const STORAGE_KEY_TOKEN: &str = "studyhub_token";

/// Get the access token from localStorage
///
/// Returns None if localStorage is not available or no token is stored
#[cfg(not(feature = "ssr"))]
pub fn get_token() -> Option<String> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    storage.get_item(STORAGE_KEY_TOKEN).ok()?
}

/// Persist the access token in localStorage
#[cfg(not(feature = "ssr"))]
pub fn set_token(token: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window available")?;
    let storage = window
        .local_storage()
        .map_err(|_| "Failed to get localStorage")?
        .ok_or("localStorage not available")?;

    storage
        .set_item(STORAGE_KEY_TOKEN, token)
        .map_err(|_| "Failed to set token")?;
    Ok(())
}

/// Remove the access token from localStorage
#[cfg(not(feature = "ssr"))]
pub fn clear_token() -> Result<(), String> {
    let window = web_sys::window().ok_or("No window available")?;
    let storage = window
        .local_storage()
        .map_err(|_| "Failed to get localStorage")?
        .ok_or("localStorage not available")?;
    storage
        .remove_item(STORAGE_KEY_TOKEN)
        .map_err(|_| "Failed to remove token")?;
    Ok(())
}

/// Add Authorization header with the stored token to a web_sys::Request
///
/// If a token is stored, adds "Authorization: Bearer <token>"
#[cfg(not(feature = "ssr"))]
pub fn add_auth_header(request: &web_sys::Request) -> Result<(), String> {
    if let Some(token) = get_token() {
        request
            .headers()
            .set("Authorization", &format!("Bearer {}", token))
            .map_err(|_| "Failed to set Authorization header")?;
    }
    Ok(())
}

/// SSR stubs - these functions do nothing on the server
#[cfg(feature = "ssr")]
pub fn get_token() -> Option<String> {
    None
}

#[cfg(feature = "ssr")]
pub fn set_token(_token: &str) -> Result<(), String> {
    Ok(())
}

#[cfg(feature = "ssr")]
pub fn clear_token() -> Result<(), String> {
    Ok(())
}

#[cfg(feature = "ssr")]
pub fn add_auth_header<T>(_request: &T) -> Result<(), String> {
    Ok(())
}
