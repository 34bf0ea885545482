use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Typed failure raised by every API call. The variant classifies the
/// server's `code`; the payload is the user-displayable message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Authentication(String),
    #[error("{0}")]
    DuplicateEmail(String),
    #[error("{0}")]
    WeakPassword(String),
    #[error("{0}")]
    LimitExceeded(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Network(String),
}

impl ApiError {
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(msg)
            | ApiError::Authentication(msg)
            | ApiError::DuplicateEmail(msg)
            | ApiError::WeakPassword(msg)
            | ApiError::LimitExceeded(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg)
            | ApiError::Network(msg) => msg,
        }
    }

    /// Classifies a `{code, message}` error body. The server's message
    /// wins; `fallback` covers bodies with no message at all.
    pub fn classify(code: Option<&str>, message: Option<String>, fallback: &str) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        match code.unwrap_or_default() {
            "VALIDATION_ERROR" => ApiError::Validation(message),
            "AUTHENTICATION_ERROR" => ApiError::Authentication(message),
            "DUPLICATE_EMAIL" => ApiError::DuplicateEmail(message),
            "WEAK_PASSWORD" => ApiError::WeakPassword(message),
            "MAX_MVP_LIMIT_EXCEEDED" => ApiError::LimitExceeded(message),
            "ARTICLE_NOT_FOUND" | "NOT_FOUND" | "USER_NOT_FOUND" => ApiError::NotFound(message),
            _ => ApiError::Internal(message),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_role() -> String {
    "user".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
}

impl AppUser {
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("admin")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub body: String,
    pub like_count: i64,
    pub stock_count: i64,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct ArticlesResponse {
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArticleRequest {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTopicRequest {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: AppUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeResponse {
    pub user: AppUser,
}
