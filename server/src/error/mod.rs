use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Error body shared with the external articles API: `{code, message}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

#[derive(Debug)]
pub enum AppError {
    Validation(String),
    Authentication(String),
    DuplicateEmail(String),
    WeakPassword(String),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR".to_string(), msg)
            }
            AppError::Authentication(msg) => (
                StatusCode::UNAUTHORIZED,
                "AUTHENTICATION_ERROR".to_string(),
                msg,
            ),
            AppError::DuplicateEmail(msg) => {
                (StatusCode::CONFLICT, "DUPLICATE_EMAIL".to_string(), msg)
            }
            AppError::WeakPassword(msg) => {
                (StatusCode::BAD_REQUEST, "WEAK_PASSWORD".to_string(), msg)
            }
            AppError::InternalServerError(err) => {
                tracing::error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR".to_string(),
                    "予期せぬエラーが発生しました".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse { code, message });
        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalServerError(err)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        AppError::Validation(messages.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn response_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn app_error_into_response_maps_status_and_code() {
        let response = AppError::Validation("メールアドレスが必要です".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "メールアドレスが必要です");

        let response = AppError::Authentication("nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = response_json(response).await;
        assert_eq!(json["code"], "AUTHENTICATION_ERROR");

        let response = AppError::DuplicateEmail("登録済み".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = response_json(response).await;
        assert_eq!(json["code"], "DUPLICATE_EMAIL");

        let response = AppError::WeakPassword("弱い".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["code"], "WEAK_PASSWORD");
    }

    #[tokio::test]
    async fn app_error_internal_hides_details() {
        let response = AppError::InternalServerError(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = response_json(response).await;
        assert_eq!(json["code"], "INTERNAL_SERVER_ERROR");
        assert!(!json["message"].as_str().unwrap().contains("boom"));
    }
}
