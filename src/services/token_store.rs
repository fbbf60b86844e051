// 本地持久化存储 - 保存访问令牌
//
// 以 JSON 对象（键 -> 字符串）的形式保存在单个文件中，
// 相当于浏览器的 localStorage。令牌不记录过期时间。

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::{Mutex, RwLock};

use crate::external::{MovieApi, MovieError};

/// 令牌在本地存储中的键名
pub const TOKEN_KEY: &str = "token";

/// 本地键值存储接口
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, MovieError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), MovieError>;
    async fn remove(&self, key: &str) -> Result<(), MovieError>;
}

/// 基于文件的本地存储
pub struct FileTokenStore {
    /// 存储文件路径
    path: PathBuf,

    /// 串行化同一实例上的读取与读-改-写
    io_lock: Mutex<()>,
}

impl FileTokenStore {
    /// 默认存储文件路径
    pub const DEFAULT_PATH: &'static str = "movie_storage.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取全部条目
    ///
    /// - 文件不存在视为空存储
    /// - 文件损坏时备份旧文件并视为空存储
    async fn load(&self) -> Result<HashMap<String, String>, MovieError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| MovieError::Storage(format!("Failed to read storage file: {}", e)))?;

        match serde_json::from_str::<HashMap<String, String>>(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!("Storage file is corrupted, treating as empty: {}", e);
                self.backup_corrupted().await;
                Ok(HashMap::new())
            }
        }
    }

    async fn save(&self, entries: &HashMap<String, String>) -> Result<(), MovieError> {
        let json = serde_json::to_string_pretty(entries)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| MovieError::Storage(format!("Failed to create storage directory: {}", e)))?;
            }
        }

        // 先写临时文件再改名，读取方不会看到写了一半的内容
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .await
            .map_err(|e| MovieError::Storage(format!("Failed to write storage file: {}", e)))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| MovieError::Storage(format!("Failed to write storage file: {}", e)))?;

        tracing::debug!("Saved local storage: {:?}", self.path);
        Ok(())
    }

    async fn backup_corrupted(&self) {
        let backup_path = self.path.with_extension("json.backup");
        match fs::rename(&self.path, &backup_path).await {
            Ok(_) => tracing::info!("Backed up corrupted storage file to: {:?}", backup_path),
            // 备份失败不影响主流程
            Err(e) => tracing::warn!("Failed to back up storage file: {}", e),
        }
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>, MovieError> {
        let _guard = self.io_lock.lock().await;
        let entries = self.load().await?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), MovieError> {
        let _guard = self.io_lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), MovieError> {
        let _guard = self.io_lock.lock().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.save(&entries).await?;
        }
        Ok(())
    }
}

/// 内存存储，进程结束即丢失
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建预置令牌的存储
    pub fn with_token(token: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>, MovieError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), MovieError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), MovieError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// 令牌来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// 本地存储中已有
    Stored(String),
    /// 刚从认证接口获取
    Fetched(String),
}

impl TokenSource {
    pub fn token(&self) -> &str {
        match self {
            TokenSource::Stored(token) | TokenSource::Fetched(token) => token,
        }
    }
}

/// 解析访问令牌
///
/// 先读本地存储，不存在（或为空串）时调用认证接口。
/// 认证接口返回空令牌时报 `MissingToken`，与存储缺失对调用方表现一致。
/// 获取到的新令牌会写回存储，写入失败只记录警告。
pub async fn resolve_token(
    store: &dyn TokenStore,
    api: &dyn MovieApi,
) -> Result<TokenSource, MovieError> {
    if let Some(token) = store.get(TOKEN_KEY).await?.filter(|t| !t.is_empty()) {
        tracing::debug!("Using stored access token");
        return Ok(TokenSource::Stored(token));
    }

    let token = api.obtain_token().await?;
    if token.is_empty() {
        return Err(MovieError::MissingToken);
    }

    if let Err(e) = store.set(TOKEN_KEY, &token).await {
        tracing::warn!("Failed to persist access token: {}", e);
    }
    Ok(TokenSource::Fetched(token))
}
