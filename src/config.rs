// 应用配置
//
// 从环境变量（以及 .env 文件）读取，缺失或无法解析时使用默认值

use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::external::MovieError;
use crate::services::{FileTokenStore, DEFAULT_PAGE_SIZE};

/// 后端地址默认值
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
/// 请求超时默认值（秒）
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 电影后端根地址
    pub api_base_url: Url,
    /// 本地存储文件路径
    pub storage_path: PathBuf,
    /// 默认每页数量
    pub page_size: u32,
    pub http_timeout: Duration,
}

impl AppConfig {
    /// 从进程环境加载配置
    pub fn from_env() -> Result<Self, MovieError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MovieError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("MOVIE_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = Url::parse(base_url.trim())?;

        let storage_path = lookup("MOVIE_STORAGE_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(FileTokenStore::DEFAULT_PATH));

        let page_size = lookup("MOVIE_PAGE_SIZE")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let timeout_secs = lookup("MOVIE_HTTP_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

        Ok(Self {
            api_base_url,
            storage_path,
            page_size,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
