use leptos::*;
use leptos_router::*;

use crate::{
    api::ApiClient,
    pages::{
        article_detail::ArticleDetailPage, article_new::ArticleNewPage, home::HomePage,
        login::LoginPage, signup::SignupPage, topics::TopicsPage,
    },
    state::auth::AuthProvider,
};

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/articles/new",
    "/articles/:id",
    "/topics",
    "/login",
    "/signup",
];

/// Mirrors the server guard's protected prefixes; the server remains
/// the authority, these are for client-side navigation hints.
pub const PROTECTED_ROUTE_PATHS: &[&str] = &["/articles/new"];

pub const AUTH_ONLY_ROUTE_PATHS: &[&str] = &["/login", "/signup"];

#[cfg(target_arch = "wasm32")]
pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(ApiClient::new());
    view! {
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/articles/new" view=ArticleNewPage/>
                    <Route path="/articles/:id" view=ArticleDetailPage/>
                    <Route path="/topics" view=TopicsPage/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/signup" view=SignupPage/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}
