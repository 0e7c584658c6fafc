//! Backend URL construction.

/// Port the backend listens on by default (`[server] port`).
pub const BACKEND_PORT: u16 = 3000;

/// Base URL of the backend, derived from the page location.
///
/// Returns "" when there is no window, which yields same-origin relative
/// URLs.
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

/// Full URL for an API path such as `/api/tab_set`.
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
