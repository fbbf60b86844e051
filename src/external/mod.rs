pub mod error;
pub mod movie_api;

pub use error::{MovieError, UNKNOWN_ERROR_MESSAGE};
pub use movie_api::{MovieApi, MovieApiClient, TokenResponse};

#[cfg(test)]
pub use movie_api::MockMovieApi;
