pub mod movie_detail;
pub mod movie_store;
pub mod token_store;

#[cfg(test)]
pub(crate) mod fixtures;

pub use movie_detail::{DetailState, MovieDetailLoader};
pub use movie_store::{FetchStatus, MovieState, MovieStore, DEFAULT_PAGE_SIZE};
pub use token_store::{resolve_token, FileTokenStore, MemoryTokenStore, TokenSource, TokenStore, TOKEN_KEY};
