use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::session::claims::ResolvedUser;

use super::session::CurrentUser;

/// Page prefixes that require a signed-in user.
pub const PROTECTED_PREFIXES: &[&str] =
    &["/articles/new", "/articles/edit", "/dashboard", "/profile"];

/// Pages only a guest should see.
pub const AUTH_ONLY_PATHS: &[&str] = &["/login", "/signup"];

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(String),
}

/// Pure page-access decision. Rule 1 (protected page, no user) wins
/// over rule 2 (auth-only page, signed-in user).
pub fn decide(path: &str, user: Option<&ResolvedUser>) -> RouteDecision {
    if PROTECTED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
        && user.is_none()
    {
        // carry the original path so login can return the user there
        return RouteDecision::Redirect(format!("{}?redirect={}", LOGIN_PATH, path));
    }

    if AUTH_ONLY_PATHS.contains(&path) && user.is_some() {
        return RouteDecision::Redirect(HOME_PATH.to_string());
    }

    RouteDecision::Allow
}

/// Paths the session middleware stack covers: every page navigation,
/// but not the API surface or static assets.
pub fn applies_to(path: &str) -> bool {
    !(path.starts_with("/api/")
        || path.starts_with("/pkg/")
        || path.starts_with("/assets/")
        || path == "/favicon.ico")
}

pub async fn route_guard(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if !applies_to(&path) {
        return next.run(request).await;
    }

    let user = request
        .extensions()
        .get::<CurrentUser>()
        .and_then(|current| current.0.clone());

    match decide(&path, user.as_ref()) {
        RouteDecision::Allow => next.run(request).await,
        RouteDecision::Redirect(target) => Redirect::temporary(&target).into_response(),
    }
}
