use std::sync::Arc;

use crate::external::{MovieApi, MovieError};
use crate::models::Movie;
use crate::services::token_store::{resolve_token, TokenStore};

/// 详情页状态
#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    pub movie: Option<Movie>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for DetailState {
    /// 详情页一打开就处于加载中
    fn default() -> Self {
        Self {
            movie: None,
            loading: true,
            error: None,
        }
    }
}

/// 电影详情加载器
#[derive(Clone)]
pub struct MovieDetailLoader {
    api: Arc<dyn MovieApi>,
    tokens: Arc<dyn TokenStore>,
}

impl MovieDetailLoader {
    pub fn new(api: Arc<dyn MovieApi>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { api, tokens }
    }

    /// 按 ID 加载电影详情，失败时错误消息写入返回的状态
    pub async fn load(&self, id: Option<&str>) -> DetailState {
        let result = match id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => self.fetch(id).await,
            None => Err(MovieError::NotFound("Movie ID not provided".to_string())),
        };

        match result {
            Ok(movie) => DetailState {
                movie: Some(movie),
                loading: false,
                error: None,
            },
            Err(e) => {
                let message = e.user_message();
                tracing::warn!("Failed to load movie details: {}", message);
                DetailState {
                    movie: None,
                    loading: false,
                    error: Some(message),
                }
            }
        }
    }

    async fn fetch(&self, id: &str) -> Result<Movie, MovieError> {
        let token = resolve_token(self.tokens.as_ref(), self.api.as_ref()).await?;
        let movie = self.api.get_movie(token.token(), id).await?;
        tracing::debug!("Loaded details for movie {}", movie.id);
        Ok(movie)
    }
}
