#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use leptos::*;

    use crate::api::{ApiClient, AppUser, Article};
    use crate::state::auth::AuthFacade;
    use crate::state::events::{AuthChange, AuthEvents, SessionSnapshot};

    pub fn regular_user() -> AppUser {
        AppUser {
            id: "u-regular".into(),
            username: "ramen_lover".into(),
            avatar_url: None,
            role: "user".into(),
        }
    }

    pub fn admin_user() -> AppUser {
        AppUser {
            id: "u-admin".into(),
            username: "staff".into(),
            avatar_url: None,
            role: "admin".into(),
        }
    }

    pub fn sample_article(id: i64) -> Article {
        Article {
            id,
            author_id: 7,
            title: "家系の基本".into(),
            body: "<p>濃厚スープの話</p>".into(),
            like_count: 3,
            stock_count: 1,
            image_urls: Vec::new(),
            created_at: "2025-06-09T19:50:00.452684".into(),
            updated_at: "2025-06-09T19:50:00.452684".into(),
        }
    }

    /// Builds a facade in the given auth state and provides it as
    /// context, the way `AuthProvider` would at runtime.
    pub fn provide_auth(user: Option<AppUser>) -> AuthFacade {
        let facade = AuthFacade::new(
            ApiClient::new_with_base_urls("http://localhost:1/api", "http://localhost:1/api"),
            AuthEvents::new(),
        );
        match user {
            Some(user) => facade.apply_change(AuthChange::SignedIn, Some(&SessionSnapshot { user })),
            None => facade.apply_change(AuthChange::SignedOut, None),
        }
        provide_context(facade.clone());
        facade
    }
}
