// 电影搜索浏览客户端库
//
// 本库提供电影搜索与详情浏览的核心功能，包括：
// - 电影后端数据客户端（令牌获取、分页列表、详情）
// - 令牌本地持久化
// - 搜索/分页状态仓库
// - 应用配置

pub mod config;
pub mod external;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use external::{MovieApi, MovieApiClient, MovieError};
pub use models::{Movie, MovieGenre, MovieListQuery, MovieListResponse};
pub use services::{MovieDetailLoader, MovieState, MovieStore};
