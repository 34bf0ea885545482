use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod support;

use knowme_server::session::{
    cookies::{CookieOptions, SameSite, ACCESS_COOKIE_NAME, REFRESH_COOKIE_NAME},
    SessionCookie, SessionRefresh,
};
use support::{test_app, test_claims, StubStore};

fn rotated_cookie() -> SessionCookie {
    SessionCookie::new(
        ACCESS_COOKIE_NAME,
        "rotated-token",
        CookieOptions {
            path: "/".into(),
            max_age: Some(1800),
            http_only: true,
            same_site: SameSite::Lax,
            secure: false,
        },
    )
}

#[tokio::test]
async fn instructed_cookie_lands_on_response_exactly_once_with_options_intact() {
    let app = test_app(StubStore::anonymous().on_refresh(|_| {
        Ok(SessionRefresh {
            cookies: vec![rotated_cookie()],
            claims: Some(test_claims()),
        })
    }));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let set_cookies: Vec<_> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter(|v| v.to_str().unwrap().starts_with(ACCESS_COOKIE_NAME))
        .collect();
    assert_eq!(set_cookies.len(), 1);
    let header_value = set_cookies[0].to_str().unwrap();
    assert!(header_value.starts_with("km-access-token=rotated-token"));
    assert!(header_value.contains("Path=/"));
    assert!(header_value.contains("Max-Age=1800"));
    assert!(header_value.contains("HttpOnly"));
    assert!(header_value.contains("SameSite=Lax"));
    assert!(!header_value.contains("Secure"));
}

#[tokio::test]
async fn refresh_cookies_survive_a_guard_redirect() {
    // expired session on a protected page: the clearing cookies must
    // ride along on the redirect response
    let app = test_app(StubStore::anonymous().on_refresh(|_| {
        Ok(SessionRefresh {
            cookies: knowme_server::session::cookies::clear_session_cookies(false),
            claims: None,
        })
    }));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/articles/new")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    let set_cookies: Vec<String> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(set_cookies.len(), 2);
    assert!(set_cookies.iter().any(|c| c.starts_with(&format!("{}=;", ACCESS_COOKIE_NAME))));
    assert!(set_cookies.iter().any(|c| c.starts_with(&format!("{}=;", REFRESH_COOKIE_NAME))));
    assert!(set_cookies.iter().all(|c| c.contains("Max-Age=0")));
}

#[tokio::test]
async fn no_instruction_means_no_cookie_writes() {
    let app = test_app(StubStore::authenticated(test_claims()));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn relay_leaves_api_routes_untouched() {
    let app = test_app(StubStore::anonymous().on_refresh(|_| {
        panic!("relay must not run on the API surface");
    }));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/config.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
