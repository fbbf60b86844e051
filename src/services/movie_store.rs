// 搜索/分页状态仓库
//
// 保存筛选条件、当前页、已加载的电影、加载/错误标志与分页总数。
// 唯一的异步操作 `fetch_movies` 会向后端发出两次列表请求：
// 一次按当前每页数量取数据，一次按每页 1 条读取 totalPages 作为结果总数。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::external::{MovieApi, MovieError};
use crate::models::{Movie, MovieGenre, MovieListQuery};
use crate::services::token_store::{resolve_token, TokenStore};

/// 默认每页数量
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// 加载状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Failed(String),
}

/// 仓库状态
///
/// 所有状态转换都在这里完成，筛选条件变化时重置页码的规则也在 setter 中检查
#[derive(Debug, Clone, PartialEq)]
pub struct MovieState {
    pub search: String,
    pub selected_genre: Option<MovieGenre>,
    pub limit: u32,
    pub current_page: u32,
    pub movies: Vec<Movie>,
    pub loading: bool,
    pub error: Option<String>,
    pub total_pages: u64,
    pub total_results: u64,
}

impl Default for MovieState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl MovieState {
    pub fn with_page_size(limit: u32) -> Self {
        Self {
            search: String::new(),
            selected_genre: None,
            limit: limit.max(1),
            current_page: 1,
            movies: Vec::new(),
            loading: false,
            error: None,
            total_pages: 1,
            total_results: 0,
        }
    }

    /// 修改搜索文本，内容变化时页码回到 1
    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search != self.search {
            self.search = search;
            self.current_page = 1;
        }
    }

    /// 修改类型筛选，变化时页码回到 1
    pub fn set_selected_genre(&mut self, genre: Option<MovieGenre>) {
        if genre != self.selected_genre {
            self.selected_genre = genre;
            self.current_page = 1;
        }
    }

    /// 修改每页数量，不影响当前页码
    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit.max(1);
    }

    pub fn set_current_page(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    /// 最后一页页码（至少为 1）
    pub fn last_page(&self) -> u32 {
        u32::try_from(self.total_pages.max(1)).unwrap_or(u32::MAX)
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.last_page()
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    /// 前进一页，已在最后一页时返回 false
    pub fn next_page(&mut self) -> bool {
        if self.has_next_page() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// 后退一页，已在第一页时返回 false
    pub fn previous_page(&mut self) -> bool {
        if self.has_previous_page() {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    pub fn status(&self) -> FetchStatus {
        if self.loading {
            FetchStatus::Loading
        } else if let Some(ref message) = self.error {
            FetchStatus::Failed(message.clone())
        } else {
            FetchStatus::Idle
        }
    }

    /// 当前筛选条件对应的查询参数
    pub fn query(&self, limit: u32) -> MovieListQuery {
        MovieListQuery {
            search: Some(self.search.clone()),
            genre: self.selected_genre,
            page: Some(self.current_page),
            limit: Some(limit),
        }
    }
}

/// 搜索/分页状态仓库
///
/// 克隆后共享同一份状态
#[derive(Clone)]
pub struct MovieStore {
    api: Arc<dyn MovieApi>,
    tokens: Arc<dyn TokenStore>,
    state: Arc<RwLock<MovieState>>,
    latest_request: Arc<AtomicU64>,
}

impl MovieStore {
    pub fn new(api: Arc<dyn MovieApi>, tokens: Arc<dyn TokenStore>) -> Self {
        Self::with_state(api, tokens, MovieState::default())
    }

    pub fn with_state(
        api: Arc<dyn MovieApi>,
        tokens: Arc<dyn TokenStore>,
        state: MovieState,
    ) -> Self {
        Self {
            api,
            tokens,
            state: Arc::new(RwLock::new(state)),
            latest_request: Arc::new(AtomicU64::new(0)),
        }
    }

    /// 获取当前状态快照
    pub async fn snapshot(&self) -> MovieState {
        self.state.read().await.clone()
    }

    pub async fn set_search(&self, search: impl Into<String>) {
        self.state.write().await.set_search(search);
    }

    pub async fn set_selected_genre(&self, genre: Option<MovieGenre>) {
        self.state.write().await.set_selected_genre(genre);
    }

    pub async fn set_limit(&self, limit: u32) {
        self.state.write().await.set_limit(limit);
    }

    pub async fn set_current_page(&self, page: u32) {
        self.state.write().await.set_current_page(page);
    }

    pub async fn next_page(&self) -> bool {
        self.state.write().await.next_page()
    }

    pub async fn previous_page(&self) -> bool {
        self.state.write().await.previous_page()
    }

    /// 提交搜索表单：回到第一页后重新加载
    pub async fn submit_search(&self) {
        self.set_current_page(1).await;
        self.fetch_movies().await;
    }

    /// 刷新电影列表与分页总数
    ///
    /// 失败不会向外抛出，错误消息写入 `error`；已完成步骤的结果不会回滚。
    /// 多次调用并发时只有最后发起的请求能写回状态。
    pub async fn fetch_movies(&self) {
        let request_id = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;

        let state = {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
            state.clone()
        };

        let result = self.load(request_id, &state).await;

        let mut current = self.state.write().await;
        if !self.is_latest(request_id) {
            tracing::debug!("Discarding result of superseded request #{}", request_id);
            return;
        }
        if let Err(e) = result {
            let message = e.user_message();
            tracing::warn!("Failed to fetch movies: {}", message);
            current.error = Some(message);
        }
        current.loading = false;
    }

    async fn load(&self, request_id: u64, filters: &MovieState) -> Result<(), MovieError> {
        let token = resolve_token(self.tokens.as_ref(), self.api.as_ref()).await?;
        let token = token.token();

        let page = self.api.list_movies(token, &filters.query(filters.limit)).await?;
        {
            let mut state = self.state.write().await;
            if !self.is_latest(request_id) {
                return Ok(());
            }
            state.movies = page.data;
            state.total_pages = page.total_pages;
        }

        // 每页 1 条时 totalPages 即为匹配结果总数
        let count = self.api.list_movies(token, &filters.query(1)).await?;
        {
            let mut state = self.state.write().await;
            if !self.is_latest(request_id) {
                return Ok(());
            }
            state.total_results = count.total_pages;
            tracing::info!(
                "Fetched {} movies (page {}/{}, {} results)",
                state.movies.len(),
                filters.current_page,
                state.total_pages,
                state.total_results
            );
        }

        Ok(())
    }

    fn is_latest(&self, request_id: u64) -> bool {
        self.latest_request.load(Ordering::SeqCst) == request_id
    }
}
