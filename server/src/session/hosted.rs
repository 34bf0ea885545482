use anyhow::anyhow;
use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;

use super::{
    claims::{Claims, ResolvedUser},
    cookies::{
        clear_session_cookies, session_cookies, RequestCookies, SessionCookie,
        ACCESS_COOKIE_NAME, REFRESH_COOKIE_NAME,
    },
    store::{EstablishedSession, SessionRefresh, SessionStore, SessionStoreError},
};

const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// HTTP client for the hosted identity provider. Access tokens are
/// verified locally against the store's signing key; only the refresh
/// grant and the credential flows go over the wire.
pub struct HostedStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    decoding_key: DecodingKey,
    validation: Validation,
    secure_cookies: bool,
}

impl HostedStore {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let material = config.session_jwt_key.as_str();
        let (decoding_key, algorithm) = if material.contains("BEGIN PUBLIC KEY") {
            (DecodingKey::from_rsa_pem(material.as_bytes())?, Algorithm::RS256)
        } else {
            // shared-secret signing, used by local development stores
            (DecodingKey::from_secret(material.as_bytes()), Algorithm::HS256)
        };
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.session_store_url.trim_end_matches('/').to_string(),
            api_key: config.session_store_key.clone(),
            decoding_key,
            validation: Validation::new(algorithm),
            secure_cookies: config.secure_cookies(),
        })
    }

    fn verify(&self, token: &str) -> Option<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .ok()
    }

    async fn request_tokens(
        &self,
        grant_type: &str,
        body: serde_json::Value,
    ) -> Result<TokenResponse, SessionStoreError> {
        let response = self
            .http
            .post(format!("{}/token?grant_type={}", self.base_url, grant_type))
            .header("apikey", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| SessionStoreError::Transport(anyhow!(err)))?;

        if response.status().is_success() {
            response
                .json::<TokenResponse>()
                .await
                .map_err(|err| SessionStoreError::Transport(anyhow!(err)))
        } else {
            Err(rejection(response).await)
        }
    }

    fn issue_cookies(&self, tokens: &TokenResponse) -> Vec<SessionCookie> {
        session_cookies(
            &tokens.access_token,
            &tokens.refresh_token,
            tokens.expires_in.unwrap_or(DEFAULT_TOKEN_TTL_SECS),
            self.secure_cookies,
        )
    }

    fn established(&self, tokens: TokenResponse) -> Result<EstablishedSession, SessionStoreError> {
        let cookies = self.issue_cookies(&tokens);
        let user = tokens.resolved_user().ok_or_else(|| SessionStoreError::Rejected {
            code: "missing_user".to_string(),
            message: "token response carried no user".to_string(),
        })?;
        Ok(EstablishedSession { user, cookies })
    }
}

#[async_trait]
impl SessionStore for HostedStore {
    async fn refresh(
        &self,
        cookies: &RequestCookies,
    ) -> Result<SessionRefresh, SessionStoreError> {
        // Valid access token: claims come from local verification, no
        // cookie writes needed.
        if let Some(claims) = cookies.get(ACCESS_COOKIE_NAME).and_then(|t| self.verify(t)) {
            return Ok(SessionRefresh {
                cookies: Vec::new(),
                claims: Some(claims),
            });
        }

        let Some(refresh_token) = cookies.get(REFRESH_COOKIE_NAME) else {
            return Ok(SessionRefresh::anonymous());
        };

        match self
            .request_tokens("refresh_token", json!({ "refresh_token": refresh_token }))
            .await
        {
            Ok(tokens) => {
                let claims = self.verify(&tokens.access_token);
                Ok(SessionRefresh {
                    cookies: self.issue_cookies(&tokens),
                    claims,
                })
            }
            // The store no longer recognizes this session: instruct the
            // browser to drop it. Still a "no user" outcome, not an error.
            Err(SessionStoreError::InvalidCredentials)
            | Err(SessionStoreError::Rejected { .. }) => Ok(SessionRefresh {
                cookies: clear_session_cookies(self.secure_cookies),
                claims: None,
            }),
            Err(err) => Err(err),
        }
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<EstablishedSession, SessionStoreError> {
        let tokens = self
            .request_tokens("password", json!({ "email": email, "password": password }))
            .await?;
        self.established(tokens)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<EstablishedSession, SessionStoreError> {
        let response = self
            .http
            .post(format!("{}/signup", self.base_url))
            .header("apikey", &self.api_key)
            .json(&json!({
                "email": email,
                "password": password,
                "data": {
                    "username": username,
                    "avatar_url": "",
                    "role": "user",
                },
            }))
            .send()
            .await
            .map_err(|err| SessionStoreError::Transport(anyhow!(err)))?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        let tokens = response
            .json::<TokenResponse>()
            .await
            .map_err(|err| SessionStoreError::Transport(anyhow!(err)))?;
        self.established(tokens)
    }

    async fn sign_out(&self, cookies: &RequestCookies) -> Result<(), SessionStoreError> {
        let Some(access_token) = cookies.get(ACCESS_COOKIE_NAME) else {
            return Ok(());
        };
        let response = self
            .http
            .post(format!("{}/logout", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|err| SessionStoreError::Transport(anyhow!(err)))?;
        if response.status().is_success() || response.status().as_u16() == 401 {
            // an already-dead session counts as signed out
            Ok(())
        } else {
            Err(rejection(response).await)
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    user: Option<StoreUser>,
}

impl TokenResponse {
    fn resolved_user(&self) -> Option<ResolvedUser> {
        let user = self.user.as_ref()?;
        let metadata = user.user_metadata.clone().unwrap_or_default();
        Some(ResolvedUser {
            id: user.id.clone(),
            username: metadata.username.unwrap_or_default(),
            avatar_url: metadata.avatar_url.filter(|url| !url.is_empty()),
            role: metadata
                .role
                .filter(|role| !role.is_empty())
                .unwrap_or_else(|| "user".to_string()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct StoreUser {
    id: String,
    #[serde(default)]
    user_metadata: Option<StoreUserMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StoreUserMetadata {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StoreErrorBody {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

async fn rejection(response: reqwest::Response) -> SessionStoreError {
    let status = response.status();
    let body = response.json::<StoreErrorBody>().await.unwrap_or_default();
    let code = body.error_code.unwrap_or_else(|| status.as_u16().to_string());
    match code.as_str() {
        "invalid_credentials" | "invalid_grant" => SessionStoreError::InvalidCredentials,
        "email_exists" | "user_already_exists" => SessionStoreError::EmailExists,
        "weak_password" => SessionStoreError::WeakPassword,
        _ => SessionStoreError::Rejected {
            code,
            message: body.msg.unwrap_or_default(),
        },
    }
}
