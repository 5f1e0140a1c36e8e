use axum::http::{HeaderMap, header};
use uuid::Uuid;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Build the Set-Cookie value carrying a session token.
///
/// HttpOnly keeps the token away from scripts; SameSite=Lax still allows the
/// top-level form redirects this app is built around.
pub fn session_cookie(token: Uuid, max_age_secs: i64) -> String {
    format!("{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age_secs}")
}

/// Build the Set-Cookie value that removes the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}

/// Pull the session token out of the Cookie header, if present and well-formed.
pub fn extract_session_token(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            if key == SESSION_COOKIE {
                Uuid::parse_str(value).ok()
            } else {
                None
            }
        })
}
