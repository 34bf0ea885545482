use async_trait::async_trait;
use thiserror::Error;

use super::{
    claims::{Claims, ResolvedUser},
    cookies::{RequestCookies, SessionCookie},
};

/// Outcome of one cookie-aware refresh cycle. `cookies` is the full set
/// of writes the store wants mirrored onto the response; it is applied
/// as a whole or not at all.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRefresh {
    pub cookies: Vec<SessionCookie>,
    pub claims: Option<Claims>,
}

impl SessionRefresh {
    pub fn anonymous() -> Self {
        Self {
            cookies: Vec::new(),
            claims: None,
        }
    }
}

/// A freshly established session, as returned by the credential flows.
#[derive(Debug, Clone)]
pub struct EstablishedSession {
    pub user: ResolvedUser,
    pub cookies: Vec<SessionCookie>,
}

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("email already registered")]
    EmailExists,
    #[error("password rejected as too weak")]
    WeakPassword,
    #[error("session store rejected the request ({code}): {message}")]
    Rejected { code: String, message: String },
    #[error("session store unreachable: {0}")]
    Transport(#[source] anyhow::Error),
}

/// Client contract of the hosted identity provider. The relay and the
/// auth proxy handlers only ever talk to the store through this seam.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Cookie-aware read/write cycle run once per navigation: validates
    /// the session held in `cookies`, refreshing it against the store
    /// when needed. An expired, unrecoverable session yields clearing
    /// cookies and no claims rather than an error.
    async fn refresh(&self, cookies: &RequestCookies)
        -> Result<SessionRefresh, SessionStoreError>;

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<EstablishedSession, SessionStoreError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<EstablishedSession, SessionStoreError>;

    /// Best-effort revocation of the session held in `cookies`.
    async fn sign_out(&self, cookies: &RequestCookies) -> Result<(), SessionStoreError>;
}
