#![allow(dead_code)]
use async_trait::async_trait;
use axum::Router;
use std::sync::Arc;

use knowme_server::{
    app,
    config::Config,
    session::{
        claims::Claims,
        cookies::RequestCookies,
        EstablishedSession, SessionRefresh, SessionStore, SessionStoreError,
    },
    state::AppState,
};

pub fn test_config() -> Config {
    Config {
        bind_addr: "127.0.0.1:0".into(),
        environment: "development".into(),
        session_store_url: "http://localhost:54321/auth/v1".into(),
        session_store_key: "test-publishable-key".into(),
        session_jwt_key: "test-jwt-secret".into(),
        api_base_url: "http://localhost:8080/api".into(),
        public_api_base_url: "http://localhost:8080/api".into(),
        frontend_dir: "./does-not-exist".into(),
    }
}

pub fn test_claims() -> Claims {
    Claims {
        sub: "user-1".into(),
        username: Some("ramen_lover".into()),
        avatar_url: None,
        role: Some("user".into()),
        exp: 4_102_444_800,
    }
}

type RefreshFn =
    dyn Fn(&RequestCookies) -> Result<SessionRefresh, SessionStoreError> + Send + Sync;
type CredentialFn =
    dyn Fn(&str, &str) -> Result<EstablishedSession, SessionStoreError> + Send + Sync;
type SignupFn =
    dyn Fn(&str, &str, &str) -> Result<EstablishedSession, SessionStoreError> + Send + Sync;
type SignOutFn = dyn Fn(&RequestCookies) -> Result<(), SessionStoreError> + Send + Sync;

/// Programmable in-process session store for integration tests.
pub struct StubStore {
    refresh: Box<RefreshFn>,
    sign_in: Box<CredentialFn>,
    sign_up: Box<SignupFn>,
    sign_out: Box<SignOutFn>,
}

impl Default for StubStore {
    fn default() -> Self {
        Self {
            refresh: Box::new(|_| Ok(SessionRefresh::anonymous())),
            sign_in: Box::new(|_, _| Err(SessionStoreError::InvalidCredentials)),
            sign_up: Box::new(|_, _, _| Err(SessionStoreError::InvalidCredentials)),
            sign_out: Box::new(|_| Ok(())),
        }
    }
}

impl StubStore {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(claims: Claims) -> Self {
        Self::default().on_refresh(move |_| {
            Ok(SessionRefresh {
                cookies: Vec::new(),
                claims: Some(claims.clone()),
            })
        })
    }

    pub fn on_refresh(
        mut self,
        f: impl Fn(&RequestCookies) -> Result<SessionRefresh, SessionStoreError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.refresh = Box::new(f);
        self
    }

    pub fn on_sign_in(
        mut self,
        f: impl Fn(&str, &str) -> Result<EstablishedSession, SessionStoreError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.sign_in = Box::new(f);
        self
    }

    pub fn on_sign_up(
        mut self,
        f: impl Fn(&str, &str, &str) -> Result<EstablishedSession, SessionStoreError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.sign_up = Box::new(f);
        self
    }

    pub fn on_sign_out(
        mut self,
        f: impl Fn(&RequestCookies) -> Result<(), SessionStoreError> + Send + Sync + 'static,
    ) -> Self {
        self.sign_out = Box::new(f);
        self
    }
}

#[async_trait]
impl SessionStore for StubStore {
    async fn refresh(
        &self,
        cookies: &RequestCookies,
    ) -> Result<SessionRefresh, SessionStoreError> {
        (self.refresh)(cookies)
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<EstablishedSession, SessionStoreError> {
        (self.sign_in)(email, password)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<EstablishedSession, SessionStoreError> {
        (self.sign_up)(email, password, username)
    }

    async fn sign_out(&self, cookies: &RequestCookies) -> Result<(), SessionStoreError> {
        (self.sign_out)(cookies)
    }
}

pub fn test_app(store: StubStore) -> Router {
    app(AppState::new(Arc::new(store), test_config()))
}
