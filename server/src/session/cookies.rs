use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const ACCESS_COOKIE_NAME: &str = "km-access-token";
pub const REFRESH_COOKIE_NAME: &str = "km-refresh-token";
pub const SESSION_COOKIE_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    Lax,
    Strict,
    None,
}

/// Attributes attached to a session cookie. Copied verbatim from the
/// store's instruction onto the outgoing response; the relay never edits
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    pub path: String,
    pub max_age: Option<u64>,
    pub http_only: bool,
    pub same_site: SameSite,
    pub secure: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub options: CookieOptions,
}

impl SessionCookie {
    pub fn new(name: &str, value: &str, options: CookieOptions) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            options,
        }
    }

    pub fn to_header_value(&self) -> String {
        let mut cookie = format!(
            "{}={}; Path={}",
            self.name, self.value, self.options.path
        );
        if let Some(max_age) = self.options.max_age {
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }
        if self.options.http_only {
            cookie.push_str("; HttpOnly");
        }
        cookie.push_str(&format!(
            "; SameSite={}",
            same_site_value(self.options.same_site)
        ));
        if self.options.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// Session cookie pair for a freshly issued token set.
pub fn session_cookies(
    access_token: &str,
    refresh_token: &str,
    expires_in: u64,
    secure: bool,
) -> Vec<SessionCookie> {
    let base = CookieOptions {
        path: SESSION_COOKIE_PATH.to_string(),
        max_age: Some(expires_in),
        http_only: true,
        same_site: SameSite::Lax,
        secure,
    };
    vec![
        SessionCookie::new(ACCESS_COOKIE_NAME, access_token, base.clone()),
        SessionCookie::new(
            REFRESH_COOKIE_NAME,
            refresh_token,
            CookieOptions {
                // refresh tokens outlive the access token they renew
                max_age: Some(60 * 60 * 24 * 30),
                ..base
            },
        ),
    ]
}

/// Expired cookie used when a session must be removed from the browser.
pub fn clear_cookie(name: &str, secure: bool) -> SessionCookie {
    SessionCookie::new(
        name,
        "",
        CookieOptions {
            path: SESSION_COOKIE_PATH.to_string(),
            max_age: Some(0),
            http_only: true,
            same_site: SameSite::Strict,
            secure,
        },
    )
}

pub fn clear_session_cookies(secure: bool) -> Vec<SessionCookie> {
    vec![
        clear_cookie(ACCESS_COOKIE_NAME, secure),
        clear_cookie(REFRESH_COOKIE_NAME, secure),
    ]
}

/// The request's cookie view. The relay mirrors store-issued writes into
/// this map so the remainder of the request observes the refreshed
/// session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestCookies(BTreeMap<String, String>);

impl RequestCookies {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut cookies = BTreeMap::new();
        for header in headers.get_all(header::COOKIE) {
            if let Ok(raw) = header.to_str() {
                for pair in raw.split(';') {
                    let mut parts = pair.trim().splitn(2, '=');
                    if let (Some(key), Some(value)) = (parts.next(), parts.next()) {
                        cookies.insert(key.trim().to_string(), value.trim().to_string());
                    }
                }
            }
        }
        Self(cookies)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), value.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn same_site_value(same_site: SameSite) -> &'static str {
    match same_site {
        SameSite::Lax => "Lax",
        SameSite::Strict => "Strict",
        SameSite::None => "None",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn session_cookie_header_includes_all_options() {
        let cookie = SessionCookie::new(
            ACCESS_COOKIE_NAME,
            "abc",
            CookieOptions {
                path: "/".to_string(),
                max_age: Some(3600),
                http_only: true,
                same_site: SameSite::Lax,
                secure: true,
            },
        );
        let header = cookie.to_header_value();
        assert!(header.contains("km-access-token=abc"));
        assert!(header.contains("Path=/"));
        assert!(header.contains("Max-Age=3600"));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("SameSite=Lax"));
        assert!(header.contains("Secure"));
    }

    #[test]
    fn clear_cookie_expires_immediately_with_strict_same_site() {
        let cookie = clear_cookie(REFRESH_COOKIE_NAME, false);
        let header = cookie.to_header_value();
        assert!(header.starts_with("km-refresh-token=;"));
        assert!(header.contains("Max-Age=0"));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("SameSite=Strict"));
        assert!(!header.contains("Secure"));
    }

    #[test]
    fn request_cookies_parse_multiple_headers() {
        let mut headers = HeaderMap::new();
        headers.append(
            header::COOKIE,
            HeaderValue::from_static("a=1; km-access-token=token-value"),
        );
        headers.append(header::COOKIE, HeaderValue::from_static("b=2"));
        let cookies = RequestCookies::from_headers(&headers);
        assert_eq!(cookies.get(ACCESS_COOKIE_NAME), Some("token-value"));
        assert_eq!(cookies.get("a"), Some("1"));
        assert_eq!(cookies.get("b"), Some("2"));
        assert_eq!(cookies.get("missing"), None);
    }

    #[test]
    fn request_cookie_writes_are_visible_to_later_reads() {
        let mut cookies = RequestCookies::default();
        assert!(cookies.is_empty());
        cookies.set(ACCESS_COOKIE_NAME, "fresh");
        assert_eq!(cookies.get(ACCESS_COOKIE_NAME), Some("fresh"));
    }
}
