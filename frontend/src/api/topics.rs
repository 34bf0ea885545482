use super::{client::ApiClient, types::*};

impl ApiClient {
    pub async fn fetch_topic(&self) -> Result<Topic, ApiError> {
        let fallback = "トークテーマの取得に失敗しました。";
        let base_url = self.api_base_url().await;
        let response = Self::send(
            Self::with_credentials(self.http_client().get(format!("{}/topics", base_url))),
            fallback,
        )
        .await?;
        Self::parse(response, fallback).await
    }

    pub async fn create_topic(&self, request: &CreateTopicRequest) -> Result<Topic, ApiError> {
        let fallback = "トークテーマの作成に失敗しました。";
        let base_url = self.api_base_url().await;
        let response = Self::send(
            Self::with_credentials(
                self.http_client()
                    .post(format!("{}/topics", base_url))
                    .json(request),
            ),
            fallback,
        )
        .await?;
        Self::parse(response, fallback).await
    }
}
