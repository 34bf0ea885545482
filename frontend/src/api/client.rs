use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::{api::types::*, config};

/// Thin fetch wrapper over the articles API and the auth proxy. One
/// request per call, no retries; non-success statuses become typed
/// [`ApiError`]s carrying the server's message.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    api_base_url: Option<String>,
    auth_base_url: Option<String>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            api_base_url: None,
            auth_base_url: None,
        }
    }

    pub fn new_with_base_urls(
        api_base_url: impl Into<String>,
        auth_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_base_url: Some(api_base_url.into()),
            auth_base_url: Some(auth_base_url.into()),
        }
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    /// Base URL of the external articles API, resolved from runtime
    /// configuration on first use.
    pub(crate) async fn api_base_url(&self) -> String {
        if let Some(base) = &self.api_base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    /// Base URL of the same-origin auth proxy.
    pub(crate) fn auth_base_url(&self) -> String {
        if let Some(base) = &self.auth_base_url {
            base.clone()
        } else {
            config::auth_base_url()
        }
    }

    /// Session cookies ride along on the browser's fetch.
    pub(crate) fn with_credentials(builder: RequestBuilder) -> RequestBuilder {
        #[cfg(target_arch = "wasm32")]
        {
            builder.fetch_credentials_include()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder
        }
    }

    pub(crate) async fn send(
        builder: RequestBuilder,
        fallback: &str,
    ) -> Result<Response, ApiError> {
        builder
            .send()
            .await
            .map_err(|_| ApiError::Network(fallback.to_string()))
    }

    /// Success → parse the body; failure → classify `{code, message}`.
    pub(crate) async fn parse<T: DeserializeOwned>(
        response: Response,
        fallback: &str,
    ) -> Result<T, ApiError> {
        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .map_err(|_| ApiError::Internal(fallback.to_string()))
        } else {
            Err(Self::error_from(response, fallback).await)
        }
    }

    pub(crate) async fn error_from(response: Response, fallback: &str) -> ApiError {
        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        ApiError::classify(body.code.as_deref(), body.message, fallback)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
