// 单元测试用的电影数据

use crate::external::MovieError;
use crate::models::{Movie, MovieListQuery, MovieListResponse};

pub fn movie(id: &str, title: &str) -> Movie {
    Movie {
        id: id.to_string(),
        title: title.to_string(),
        rating: "8.5".to_string(),
        poster_url: format!("https://example.com/poster{}.jpg", id),
        rating_value: None,
        best_rating: None,
        worst_rating: None,
        date_published: None,
        duration: None,
        genres: None,
        directors: None,
        writers: None,
        main_actors: None,
        summary: None,
    }
}

pub fn mock_movies() -> Vec<Movie> {
    vec![movie("1", "Mock Movie 1"), movie("2", "Mock Movie 2")]
}

pub fn page(data: Vec<Movie>, total_pages: u64) -> MovieListResponse {
    MovieListResponse {
        data,
        total_pages,
        total_results: total_pages,
    }
}

/// 两部电影；每页 1 条时 totalPages 为 100，否则为 10
pub fn default_page(query: &MovieListQuery) -> Result<MovieListResponse, MovieError> {
    let total_pages = if query.limit == Some(1) { 100 } else { 10 };
    Ok(page(mock_movies(), total_pages))
}
