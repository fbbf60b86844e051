use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use url::Url;

use movie_browser::services::{FileTokenStore, TokenStore, TOKEN_KEY};
use movie_browser::{
    AppConfig, Movie, MovieApiClient, MovieDetailLoader, MovieGenre, MovieState, MovieStore,
};

#[derive(Parser)]
#[command(name = "movie_browser", version, about = "Search and browse movies")]
struct Cli {
    /// Movie backend root URL (overrides MOVIE_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<Url>,

    /// Local storage file (overrides MOVIE_STORAGE_PATH)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search movies by title and genre
    Search {
        /// Title text to search for
        #[arg(short, long, default_value = "")]
        query: String,

        /// Genre filter, e.g. "Action" or "Sci-Fi"
        #[arg(short, long)]
        genre: Option<MovieGenre>,

        /// Movies per page
        #[arg(short, long)]
        limit: Option<u32>,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Show details of one movie
    Detail {
        /// Movie identifier
        id: String,
    },
    /// List the genres accepted by --genre
    Genres,
    /// Forget the stored access token
    ClearToken,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries rendered output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_browser=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.api_base_url = base_url;
    }
    if let Some(storage) = cli.storage {
        config.storage_path = storage;
    }
    tracing::debug!("Using movie backend {}", config.api_base_url);

    let api = Arc::new(MovieApiClient::new(
        config.api_base_url.clone(),
        config.http_timeout,
    )?);
    let tokens = Arc::new(FileTokenStore::new(&config.storage_path));

    match cli.command {
        Command::Search {
            query,
            genre,
            limit,
            page,
        } => {
            let store = MovieStore::with_state(
                api,
                tokens,
                MovieState::with_page_size(config.page_size),
            );
            store.set_search(query).await;
            store.set_selected_genre(genre).await;
            if let Some(limit) = limit {
                store.set_limit(limit).await;
            }
            store.set_current_page(page).await;
            store.fetch_movies().await;

            let state = store.snapshot().await;
            if let Some(message) = state.error {
                return Err(anyhow!(message));
            }
            print_results(&state);
        }
        Command::Detail { id } => {
            let loader = MovieDetailLoader::new(api, tokens);
            let state = loader.load(Some(&id)).await;
            match state.movie {
                Some(movie) => print_detail(&movie),
                None => {
                    let message = state.error.unwrap_or_else(|| "Movie not found".to_string());
                    return Err(anyhow!(message));
                }
            }
        }
        Command::Genres => {
            for genre in MovieGenre::ALL {
                println!("{}", genre);
            }
        }
        Command::ClearToken => {
            tokens.remove(TOKEN_KEY).await?;
            tracing::info!("Cleared stored access token");
        }
    }

    Ok(())
}

fn print_results(state: &MovieState) {
    if state.total_results > 0 {
        let noun = if state.total_results == 1 { "movie" } else { "movies" };
        println!("Found {} {}", state.total_results, noun);
    }
    if state.movies.is_empty() {
        println!("No movies found");
        return;
    }

    for movie in &state.movies {
        let year = movie
            .release_year()
            .map(|y| format!(" ({})", y))
            .unwrap_or_default();
        println!("[{}] {}{}  {}", movie.id, movie.title, year, movie.rating_label());
    }
    println!("Page {} of {}", state.current_page, state.last_page());
}

fn print_detail(movie: &Movie) {
    println!("{}", movie.title);

    let mut facts = Vec::new();
    if let Some(year) = movie.release_year() {
        facts.push(year.to_string());
    }
    if let Some(duration) = movie.duration_label() {
        facts.push(duration);
    }
    if !movie.rating.is_empty() {
        facts.push(movie.rating.clone());
    }
    if movie.rating_value.is_some() {
        facts.push(format!("★ {}", movie.rating_label()));
    }
    if !facts.is_empty() {
        println!("{}", facts.join(" | "));
    }

    let genres = movie.genre_titles();
    if !genres.is_empty() {
        println!("Genres: {}", genres.join(", "));
    }
    if !movie.poster_url.is_empty() {
        println!("Poster: {}", movie.poster_url);
    }

    if let Some(ref summary) = movie.summary {
        println!();
        println!("Summary");
        println!("{}", summary);
    }

    print_people("Director", "Directors", movie.directors.as_deref());
    print_people("Writer", "Writers", movie.writers.as_deref());

    if let Some(actors) = movie.main_actors.as_deref().filter(|a| !a.is_empty()) {
        println!();
        println!("Cast");
        for actor in actors {
            println!("  - {}", actor);
        }
    }
}

fn print_people(singular: &str, plural: &str, people: Option<&[String]>) {
    if let Some(people) = people.filter(|p| !p.is_empty()) {
        let label = if people.len() > 1 { plural } else { singular };
        println!("{}: {}", label, people.join(", "));
    }
}
