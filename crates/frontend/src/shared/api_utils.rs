//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use super::config::{API_PREFIX, BACKEND_PORT};

/// Get the base URL for API requests
///
/// Constructs the backend origin from the current window location,
/// using `BACKEND_PORT` for the REST server.
///
/// # Returns
/// - Origin like "http://localhost:8000"
/// - Empty string if window is not available (requests then stay relative)
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, BACKEND_PORT)
}

/// Build a full API URL from an endpoint path relative to `/api`
///
/// # Example
/// ```ignore
/// let url = api_url("/projects/");
/// ```
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

/// Joins origin, the `/api` prefix and `path` without doubling slashes.
pub fn join_url(origin: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    format!("{}{}/{}", origin.trim_end_matches('/'), API_PREFIX, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:8000", "/projects/"),
            "http://localhost:8000/api/projects/"
        );
        assert_eq!(
            join_url("http://localhost:8000/", "base-materials/batch-operation"),
            "http://localhost:8000/api/base-materials/batch-operation"
        );
        assert_eq!(join_url("", "/projects/"), "/api/projects/");
    }
}
