use axum::{
    http::Method,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod session;
pub mod state;

use state::AppState;

/// Assembles the full router: the auth proxy API, and every page
/// navigation behind the session relay and the route guard.
pub fn app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/signup", post(handlers::auth::signup))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/auth/me", get(handlers::auth::me))
        .route("/config.json", get(handlers::config::runtime_config))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers(Any),
        );

    let index = Path::new(&state.config.frontend_dir).join("index.html");
    let page_routes = Router::new()
        .fallback_service(
            ServeDir::new(&state.config.frontend_dir).not_found_service(ServeFile::new(index)),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn_with_state(
                    state.clone(),
                    middleware::session::refresh_session,
                ))
                .layer(axum_middleware::from_fn(middleware::guard::route_guard)),
        );

    Router::new()
        .merge(api_routes)
        .merge(page_routes)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
