use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    error::AppError,
    middleware::session::apply_cookies,
    session::{
        claims::ResolvedUser,
        cookies::{clear_session_cookies, RequestCookies},
        SessionStoreError,
    },
    state::AppState,
};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "メールアドレスが必要です"))]
    pub email: String,
    #[validate(length(min = 1, message = "パスワードが必要です"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignupPayload {
    #[validate(length(min = 1, message = "メールアドレスが必要です"))]
    pub email: String,
    #[validate(length(min = 1, message = "パスワードが必要です"))]
    pub password: String,
    #[validate(length(min = 1, message = "ユーザーネームが必要です"))]
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: ResolvedUser,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: ResolvedUser,
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Response, AppError> {
    payload.validate()?;

    let session = state
        .store
        .sign_in(&payload.email, &payload.password)
        .await
        .map_err(login_error)?;

    let mut response = (
        StatusCode::OK,
        Json(AuthResponse {
            message: "ログインに成功しました".to_string(),
            user: session.user,
        }),
    )
        .into_response();
    apply_cookies(&mut response, &session.cookies);
    Ok(response)
}

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> Result<Response, AppError> {
    payload.validate()?;
    if payload.password.chars().count() < 8 {
        return Err(AppError::WeakPassword(
            "パスワードは8文字以上で設定してください".to_string(),
        ));
    }

    let session = state
        .store
        .sign_up(&payload.email, &payload.password, &payload.username)
        .await
        .map_err(signup_error)?;

    let mut response = (
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "新規登録に成功しました".to_string(),
            user: session.user,
        }),
    )
        .into_response();
    apply_cookies(&mut response, &session.cookies);
    Ok(response)
}

/// Logout always clears the session cookies itself; the store's
/// revocation is best effort and must not block the sign-out.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let cookies = RequestCookies::from_headers(&headers);
    if let Err(err) = state.store.sign_out(&cookies).await {
        tracing::warn!(error = %err, "session store sign-out failed, clearing cookies anyway");
    }

    let mut response = (
        StatusCode::OK,
        Json(MessageResponse {
            message: "ログアウトに成功しました".to_string(),
        }),
    )
        .into_response();
    apply_cookies(
        &mut response,
        &clear_session_cookies(state.config.secure_cookies()),
    );
    response
}

/// The browser app's "who am I" probe. Runs its own refresh cycle since
/// the relay middleware does not cover the API surface.
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    let cookies = RequestCookies::from_headers(&headers);
    let outcome = state.store.refresh(&cookies).await.map_err(|err| match err {
        SessionStoreError::Transport(err) => AppError::InternalServerError(err),
        _ => AppError::Authentication("認証されていません".to_string()),
    })?;

    match outcome.claims.as_ref().map(ResolvedUser::from_claims) {
        Some(user) => {
            let mut response = (StatusCode::OK, Json(MeResponse { user })).into_response();
            apply_cookies(&mut response, &outcome.cookies);
            Ok(response)
        }
        None => Err(AppError::Authentication("認証されていません".to_string())),
    }
}

fn login_error(err: SessionStoreError) -> AppError {
    match err {
        SessionStoreError::InvalidCredentials => AppError::Authentication(
            "メールアドレスまたはパスワードが正しくありません".to_string(),
        ),
        SessionStoreError::Transport(err) => AppError::InternalServerError(err),
        _ => AppError::Authentication("ログインに失敗しました".to_string()),
    }
}

fn signup_error(err: SessionStoreError) -> AppError {
    match err {
        SessionStoreError::EmailExists => AppError::DuplicateEmail(
            "このメールアドレスは既に登録されています".to_string(),
        ),
        SessionStoreError::WeakPassword => AppError::WeakPassword(
            "パスワードは8文字以上で設定してください".to_string(),
        ),
        SessionStoreError::Transport(err) => AppError::InternalServerError(err),
        _ => AppError::Authentication("新規登録に失敗しました".to_string()),
    }
}
