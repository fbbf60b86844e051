use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::{Deserialize, Serialize};
use url::Url;

use super::MovieError;
use crate::models::search::endpoint;
use crate::models::{Movie, MovieListQuery, MovieListResponse};

/// 电影数据接口
///
/// 纯请求/响应，不做重试也不做本地缓存
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// 获取访问令牌；响应体没有 `token` 字段时返回空字符串
    async fn obtain_token(&self) -> Result<String, MovieError>;

    /// 按筛选条件获取一页电影
    async fn list_movies(
        &self,
        token: &str,
        query: &MovieListQuery,
    ) -> Result<MovieListResponse, MovieError>;

    /// 获取单部电影详情
    async fn get_movie(&self, token: &str, id: &str) -> Result<Movie, MovieError>;
}

/// 令牌接口响应
#[derive(Debug, Deserialize, Serialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// 电影后端 HTTP 客户端
#[derive(Clone)]
pub struct MovieApiClient {
    client: Client,
    base_url: Url,
}

impl MovieApiClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, MovieError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MovieError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// 非 2xx 状态统一转换为 `MovieError::Status`
    fn check_status(response: Response) -> Result<Response, MovieError> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Movie API error: {}", status);
            return Err(MovieError::Status(status.as_u16()));
        }
        Ok(response)
    }
}

#[async_trait]
impl MovieApi for MovieApiClient {
    async fn obtain_token(&self) -> Result<String, MovieError> {
        let url = endpoint(&self.base_url, &["auth", "token"])?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url.as_str()).send().await?;
        let response = Self::check_status(response)?;

        let body: TokenResponse = response.json().await?;
        Ok(body.token.unwrap_or_default())
    }

    async fn list_movies(
        &self,
        token: &str,
        query: &MovieListQuery,
    ) -> Result<MovieListResponse, MovieError> {
        let url = query.to_url(&self.base_url)?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.as_str())
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await?;
        let response = Self::check_status(response)?;

        let result: MovieListResponse = response.json().await?;
        Ok(result)
    }

    async fn get_movie(&self, token: &str, id: &str) -> Result<Movie, MovieError> {
        let url = endpoint(&self.base_url, &["movies", id])?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.as_str())
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await?;
        let response = Self::check_status(response)?;

        let movie: Movie = response.json().await?;
        Ok(movie)
    }
}
