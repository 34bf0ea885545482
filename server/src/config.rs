use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub bind_addr: String,
    pub environment: String,
    /// Hosted identity provider (auth endpoint root).
    pub session_store_url: String,
    /// Publishable API key sent with every store request.
    pub session_store_key: String,
    /// Key material for local access-token verification: a PEM public
    /// key in deployed environments, a shared secret for dev stores.
    pub session_jwt_key: String,
    /// Articles API as reached from this process (container network).
    pub api_base_url: String,
    /// Articles API as reached from the browser (host network).
    pub public_api_base_url: String,
    /// Directory holding the compiled frontend bundle.
    pub frontend_dir: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let session_store_url = env::var("SESSION_STORE_URL")
            .unwrap_or_else(|_| "http://localhost:54321/auth/v1".to_string());
        let session_store_key =
            env::var("SESSION_STORE_KEY").unwrap_or_else(|_| "dev-publishable-key".to_string());
        let session_jwt_key = env::var("SESSION_JWT_KEY")
            .unwrap_or_else(|_| "your-jwt-key-change-this-in-production".to_string());
        let api_base_url =
            env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080/api".to_string());
        let public_api_base_url =
            env::var("PUBLIC_API_BASE_URL").unwrap_or_else(|_| api_base_url.clone());
        let frontend_dir =
            env::var("FRONTEND_DIR").unwrap_or_else(|_| "./frontend/dist".to_string());

        Ok(Config {
            bind_addr,
            environment,
            session_store_url,
            session_store_key,
            session_jwt_key,
            api_base_url,
            public_api_base_url,
            frontend_dir,
        })
    }

    /// Session cookies carry `Secure` everywhere except local development.
    pub fn secure_cookies(&self) -> bool {
        self.environment != "development"
    }
}
