pub mod genre;
pub mod movie;
pub mod search;

pub use genre::MovieGenre;
pub use movie::{format_duration, release_year, GenreLabel, Movie};
pub use search::{MovieListQuery, MovieListResponse, DEFAULT_QUERY_LIMIT, DEFAULT_QUERY_PAGE};
