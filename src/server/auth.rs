//! Cookie session gate and token refresh

use axum::extract::{Request, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{AppendHeaders, IntoResponse, Response};

use crate::core::error::{AdminError, AdminResult};
use crate::server::state::AppState;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Access token issued by the refresh endpoint in mock mode
pub const MOCK_ACCESS_TOKEN: &str = "mock-access-token";

/// Read a cookie from every `Cookie` header of a request
pub fn cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value for a session cookie
pub fn session_cookie(name: &str, value: &str, secure: bool) -> String {
    let mut cookie = format!("{name}={value}; HttpOnly; Path=/; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Paths behind the session gate: `/api/*` except `/api/auth/*`
fn is_protected(path: &str) -> bool {
    path.starts_with("/api/") && !path.starts_with("/api/auth/")
}

/// Reject protected requests carrying no `accessToken` cookie
pub async fn require_session(request: Request, next: Next) -> Response {
    let path = request.uri().path();
    if is_protected(path) && cookie(request.headers(), ACCESS_TOKEN_COOKIE).is_none() {
        tracing::debug!(path, "rejected request without session cookie");
        return AdminError::unauthorized("authentication required").into_response();
    }
    next.run(request).await
}

/// `POST /api/auth/refresh`
///
/// Exchanges the `refreshToken` cookie for a new `accessToken` cookie. In
/// upstream mode the exchange goes to the backend; in mock mode a fixed token
/// is issued.
pub async fn refresh(State(state): State<AppState>, headers: HeaderMap) -> AdminResult<Response> {
    let refresh_token = cookie(&headers, REFRESH_TOKEN_COOKIE)
        .ok_or_else(|| AdminError::unauthorized("missing refresh token"))?;
    let secure = state.config.auth.cookie_secure;

    let mut cookies = Vec::with_capacity(2);
    match &state.upstream {
        Some(client) => {
            let pair = client.exchange_refresh_token(&refresh_token).await?;
            cookies.push((SET_COOKIE, session_cookie(ACCESS_TOKEN_COOKIE, &pair.access_token, secure)));
            if let Some(rotated) = pair.refresh_token {
                cookies.push((SET_COOKIE, session_cookie(REFRESH_TOKEN_COOKIE, &rotated, secure)));
            }
        }
        None => {
            cookies.push((SET_COOKIE, session_cookie(ACCESS_TOKEN_COOKIE, MOCK_ACCESS_TOKEN, secure)));
        }
    }

    tracing::info!(upstream = state.upstream.is_some(), "session refreshed");
    Ok((StatusCode::NO_CONTENT, AppendHeaders(cookies)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(values: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(COOKIE, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn test_cookie_lookup() {
        let headers = headers(&["theme=dark; accessToken=abc ; verified=1", "refreshToken=r1"]);
        assert_eq!(cookie(&headers, "accessToken").as_deref(), Some("abc"));
        assert_eq!(cookie(&headers, "refreshToken").as_deref(), Some("r1"));
        assert_eq!(cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_empty_cookie_counts_as_missing() {
        assert_eq!(cookie(&headers(&["accessToken="]), "accessToken"), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        assert_eq!(
            session_cookie("accessToken", "t", false),
            "accessToken=t; HttpOnly; Path=/; SameSite=Lax"
        );
        assert!(session_cookie("accessToken", "t", true).ends_with("; Secure"));
    }

    #[test]
    fn test_protected_paths() {
        assert!(is_protected("/api/settlements"));
        assert!(!is_protected("/api/auth/refresh"));
        assert!(!is_protected("/health"));
    }
}
