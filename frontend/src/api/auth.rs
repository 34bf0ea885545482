use super::{client::ApiClient, types::*};

impl ApiClient {
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let fallback = "ログインに失敗しました。";
        let base_url = self.auth_base_url();
        let response = Self::send(
            Self::with_credentials(
                self.http_client()
                    .post(format!("{}/auth/login", base_url))
                    .json(&LoginRequest {
                        email: email.to_string(),
                        password: password.to_string(),
                    }),
            ),
            fallback,
        )
        .await?;
        Self::parse(response, fallback).await
    }

    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<AuthResponse, ApiError> {
        let fallback = "新規ユーザー登録に失敗しました。";
        let base_url = self.auth_base_url();
        let response = Self::send(
            Self::with_credentials(
                self.http_client()
                    .post(format!("{}/auth/signup", base_url))
                    .json(&SignupRequest {
                        email: email.to_string(),
                        password: password.to_string(),
                        username: username.to_string(),
                    }),
            ),
            fallback,
        )
        .await?;
        Self::parse(response, fallback).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let fallback = "ログアウトに失敗しました。";
        let base_url = self.auth_base_url();
        let response = Self::send(
            Self::with_credentials(
                self.http_client().post(format!("{}/auth/logout", base_url)),
            ),
            fallback,
        )
        .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response, fallback).await)
        }
    }

    /// "Who am I" probe against the auth proxy; an expired or missing
    /// session is an `Authentication` failure, not a crash.
    pub async fn current_user(&self) -> Result<AppUser, ApiError> {
        let fallback = "ユーザー情報の取得に失敗しました。";
        let base_url = self.auth_base_url();
        let response = Self::send(
            Self::with_credentials(self.http_client().get(format!("{}/auth/me", base_url))),
            fallback,
        )
        .await?;
        let body: MeResponse = Self::parse(response, fallback).await?;
        Ok(body.user)
    }
}
