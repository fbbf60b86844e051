// 电影数据客户端错误类型定义
//
// 所有错误最终都会在状态仓库边界转换为一条面向用户的消息字符串

use thiserror::Error;

/// 无法提取错误信息时展示的通用消息
pub const UNKNOWN_ERROR_MESSAGE: &str = "An error occurred";

/// 电影数据客户端的统一错误类型
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MovieError {
    /// 传输层失败（离线、DNS、超时），消息原样透传
    #[error("{0}")]
    Network(String),

    #[error("HTTP error: status code {0}")]
    Status(u16),

    /// 响应体无法解析或缺少字段
    #[error("Invalid response: {0}")]
    Protocol(String),

    /// 令牌解析结果为空
    #[error("Failed to get token")]
    MissingToken,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    NotFound(String),
}

impl MovieError {
    /// 转换为界面展示的错误消息
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

// 实现从 reqwest::Error 到 MovieError 的转换
impl From<reqwest::Error> for MovieError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            MovieError::Protocol(err.to_string())
        } else if err.is_status() {
            match err.status() {
                Some(status) => MovieError::Status(status.as_u16()),
                None => MovieError::Network(err.to_string()),
            }
        } else {
            MovieError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for MovieError {
    fn from(err: serde_json::Error) -> Self {
        MovieError::Protocol(err.to_string())
    }
}

impl From<url::ParseError> for MovieError {
    fn from(err: url::ParseError) -> Self {
        MovieError::Config(format!("Invalid URL: {}", err))
    }
}
