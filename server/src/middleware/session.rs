use axum::{
    extract::{Request, State},
    http::{header::SET_COOKIE, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::{
    session::{claims::ResolvedUser, cookies::RequestCookies, SessionCookie},
    state::AppState,
};

use super::guard::applies_to;

/// The relay-resolved user for the current request. `None` is the
/// regular anonymous case, not an error.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<ResolvedUser>);

/// Cookie Relay: runs once per navigation. Hands the request's cookies
/// to the session store for a refresh cycle, mirrors every write the
/// store instructs onto the request's cookie view and the outgoing
/// response, and records the resolved user for downstream middleware
/// and handlers.
pub async fn refresh_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if !applies_to(request.uri().path()) {
        return next.run(request).await;
    }

    let incoming = RequestCookies::from_headers(request.headers());
    let (instructed, user) = match state.store.refresh(&incoming).await {
        Ok(outcome) => {
            let mut view = incoming;
            for cookie in &outcome.cookies {
                view.set(&cookie.name, &cookie.value);
            }
            request.extensions_mut().insert(view);
            let user = outcome.claims.as_ref().map(ResolvedUser::from_claims);
            (outcome.cookies, user)
        }
        Err(err) => {
            // Store infrastructure trouble degrades to anonymous; it
            // must never fabricate an identity or fail the navigation.
            tracing::warn!(error = %err, "session refresh failed, continuing as anonymous");
            request.extensions_mut().insert(incoming);
            (Vec::new(), None)
        }
    };
    request.extensions_mut().insert(CurrentUser(user));

    let mut response = next.run(request).await;
    apply_cookies(&mut response, &instructed);
    response
}

/// Copies the store's cookie jar onto the response as one unit. Options
/// travel untouched; a partially applied jar would desync the browser
/// and the store.
pub fn apply_cookies(response: &mut Response, cookies: &[SessionCookie]) {
    for cookie in cookies {
        if let Ok(value) = HeaderValue::from_str(&cookie.to_header_value()) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
}
