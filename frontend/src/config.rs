use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Runtime configuration for the browser bundle. The articles API base
/// URL differs between the host the browser sees and the network the
/// server sees, so it is injected at runtime rather than compiled in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_AUTH_BASE_URL: &str = "http://localhost:3000/api";

#[cfg(target_arch = "wasm32")]
fn get_from_env_js() -> Option<String> {
    // Optional global injected by env.js: window.__KNOWME_ENV = { API_BASE_URL: "..." }
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &"__KNOWME_ENV".into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let obj = js_sys::Object::from(any);
    let val = js_sys::Reflect::get(&obj, &"API_BASE_URL".into())
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
        .or_else(|| js_sys::Reflect::get(&obj, &"api_base_url".into()).ok());
    val.and_then(|v| v.as_string())
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let resp = reqwest::get("./config.json").await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

fn cache_base_url(value: &str) -> String {
    let value = value.to_string();
    let _ = API_BASE_URL.set(value.clone());
    value
}

/// Base URL of the external articles API. env.js wins over the served
/// config.json; both fall back to the local development default.
pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(env_url) = get_from_env_js() {
            return cache_base_url(&env_url);
        }
        if let Some(cfg) = fetch_runtime_config().await {
            if let Some(url) = cfg.api_base_url {
                return cache_base_url(&url);
            }
        }
    }
    cache_base_url(DEFAULT_API_BASE_URL)
}

/// Base URL of the auth proxy, always the app's own origin.
pub fn auth_base_url() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(origin) = web_sys::window()
            .and_then(|w| w.location().origin().ok())
        {
            return format!("{}/api", origin);
        }
    }
    DEFAULT_AUTH_BASE_URL.to_string()
}

pub async fn init() {
    let _ = await_api_base_url().await;
}
