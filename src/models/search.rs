use serde::{Deserialize, Serialize};
use url::Url;

use super::{Movie, MovieGenre};
use crate::external::MovieError;

/// 未指定页码时使用的默认值
pub const DEFAULT_QUERY_PAGE: u32 = 1;
/// 未指定每页数量时使用的默认值（直接调用客户端时才会用到）
pub const DEFAULT_QUERY_LIMIT: u32 = 10;

/// 电影列表查询参数
///
/// 四个参数总会出现在查询串里，缺省的 `search`/`genre` 以空字符串发送
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieListQuery {
    pub search: Option<String>,
    pub genre: Option<MovieGenre>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl MovieListQuery {
    /// 按固定顺序 `page, limit, search, genre` 生成查询参数
    pub fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("page", self.page.unwrap_or(DEFAULT_QUERY_PAGE).to_string()),
            ("limit", self.limit.unwrap_or(DEFAULT_QUERY_LIMIT).to_string()),
            ("search", self.search.clone().unwrap_or_default()),
            (
                "genre",
                self.genre.map(|g| g.as_str().to_string()).unwrap_or_default(),
            ),
        ]
    }

    /// 构建 `{base}/movies?page=&limit=&search=&genre=` 请求地址
    pub fn to_url(&self, base: &Url) -> Result<Url, MovieError> {
        let mut url = endpoint(base, &["movies"])?;
        url.query_pairs_mut().extend_pairs(self.query_pairs().iter());
        Ok(url)
    }
}

/// 电影列表响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieListResponse {
    #[serde(default)]
    pub data: Vec<Movie>,
    #[serde(default)]
    pub total_pages: u64,
    #[serde(default)]
    pub total_results: u64,
}

/// 在基础地址后追加路径段，保留基础地址自身的路径前缀
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, MovieError> {
    let mut url = base.clone();
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|_| MovieError::Config(format!("Base URL cannot be a base: {}", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn base() -> Url {
        Url::parse("http://localhost:3000").unwrap()
    }

    #[test]
    fn test_query_url_with_all_params() {
        let query = MovieListQuery {
            search: Some("test movie".to_string()),
            genre: Some(MovieGenre::Action),
            page: Some(1),
            limit: Some(10),
        };
        assert_eq!(
            query.to_url(&base()).unwrap().as_str(),
            "http://localhost:3000/movies?page=1&limit=10&search=test+movie&genre=Action"
        );
    }

    #[test]
    fn test_query_url_defaults() {
        let query = MovieListQuery::default();
        assert_eq!(
            query.to_url(&base()).unwrap().as_str(),
            "http://localhost:3000/movies?page=1&limit=10&search=&genre="
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let base = Url::parse("https://api.example.com/v1/").unwrap();
        let url = endpoint(&base, &["movies", "tt0111161"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/movies/tt0111161");
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let url = endpoint(&base(), &["movies", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/movies/a%20b%2Fc");
    }

    #[test]
    fn test_list_response_deserialization() {
        let response: MovieListResponse = serde_json::from_str(
            r#"{"data": [{"id": "1", "title": "Test Movie"}], "totalPages": 5, "totalResults": 50}"#,
        )
        .unwrap();
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.total_pages, 5);
        assert_eq!(response.total_results, 50);
    }

    proptest! {
        #[test]
        fn prop_query_always_has_four_params(
            search in proptest::option::of("[a-zA-Z0-9 &=?]{0,16}"),
            genre_idx in proptest::option::of(0usize..23),
            page in proptest::option::of(1u32..500),
            limit in proptest::option::of(1u32..100),
        ) {
            let query = MovieListQuery {
                search: search.clone(),
                genre: genre_idx.map(|i| MovieGenre::ALL[i]),
                page,
                limit,
            };
            let url = query.to_url(&base()).unwrap();
            let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
            let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
            prop_assert_eq!(keys, vec!["page", "limit", "search", "genre"]);
            prop_assert_eq!(&pairs[2].1, &search.unwrap_or_default());
            let expected_genre = genre_idx.map(|i| MovieGenre::ALL[i].as_str().to_string()).unwrap_or_default();
            prop_assert_eq!(&pairs[3].1, &expected_genre);
        }
    }
}
