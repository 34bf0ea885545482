use super::{client::ApiClient, types::*};

impl ApiClient {
    pub async fn fetch_articles(&self) -> Result<Vec<Article>, ApiError> {
        let fallback = "記事一覧の取得に失敗しました。";
        let base_url = self.api_base_url().await;
        let response = Self::send(
            self.http_client().get(format!("{}/articles", base_url)),
            fallback,
        )
        .await?;
        let body: ArticlesResponse = Self::parse(response, fallback).await?;
        Ok(body.articles)
    }

    pub async fn fetch_article(&self, article_id: i64) -> Result<Article, ApiError> {
        let fallback = "記事の取得に失敗しました。";
        let base_url = self.api_base_url().await;
        let response = Self::send(
            self.http_client()
                .get(format!("{}/articles/{}", base_url, article_id)),
            fallback,
        )
        .await?;
        Self::parse(response, fallback).await
    }

    pub async fn create_article(
        &self,
        request: &CreateArticleRequest,
    ) -> Result<Article, ApiError> {
        let fallback = "記事の投稿に失敗しました。";
        let base_url = self.api_base_url().await;
        let response = Self::send(
            Self::with_credentials(
                self.http_client()
                    .post(format!("{}/articles", base_url))
                    .json(request),
            ),
            fallback,
        )
        .await?;
        Self::parse(response, fallback).await
    }

    pub async fn add_like(&self, article_id: i64) -> Result<Article, ApiError> {
        let fallback = "いいねに失敗しました。";
        let base_url = self.api_base_url().await;
        let response = Self::send(
            Self::with_credentials(
                self.http_client()
                    .post(format!("{}/articles/{}/likes", base_url, article_id)),
            ),
            fallback,
        )
        .await?;
        Self::parse(response, fallback).await
    }

    /// MVPs are capped per user; the server's limit message is
    /// surfaced verbatim as [`ApiError::LimitExceeded`].
    pub async fn add_mvp(&self, article_id: i64) -> Result<Article, ApiError> {
        let fallback = "MVPに失敗しました。";
        let base_url = self.api_base_url().await;
        let response = Self::send(
            Self::with_credentials(
                self.http_client()
                    .post(format!("{}/articles/{}/mvps", base_url, article_id)),
            ),
            fallback,
        )
        .await?;
        Self::parse(response, fallback).await
    }
}
