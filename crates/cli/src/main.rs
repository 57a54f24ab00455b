mod display;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::Catalog;
use poster_client::OmdbClient;
use server::{Config, RecommendationService};
use similarity::{MeanPolicy, DEFAULT_NEIGHBOR_COUNT};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

type Service = RecommendationService<OmdbClient>;

/// Cinematch - item-based movie recommendations
#[derive(Parser)]
#[command(name = "cinematch")]
#[command(about = "Find movies similar to one you like, from MovieLens ratings", long_about = None)]
struct Cli {
    /// Path to MovieLens dataset directory (movies.csv, ratings.csv)
    #[arg(short, long, default_value = "data/ml-latest-small")]
    data_dir: PathBuf,

    /// Average only the ratings a movie received when ranking top movies
    #[arg(long)]
    observed_mean: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for titles and show recommendations (default)
    Interactive,

    /// List catalog titles that approximately match a query
    Search {
        /// Free-text title query
        #[arg(long)]
        query: String,
    },

    /// Recommend movies similar to the best match for a title
    Recommend {
        /// Free-text title query
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_NEIGHBOR_COUNT)]
        limit: usize,
    },

    /// Show the top-rated movies
    Top,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the grids
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    println!("Loading MovieLens dataset from {}...", cli.data_dir.display());
    let start = Instant::now();
    let catalog = Arc::new(
        Catalog::load_from_files(&cli.data_dir).context("Failed to load MovieLens dataset")?,
    );
    let (movies, ratings) = catalog.counts();
    println!(
        "{} Loaded {} movies and {} ratings in {:?}",
        "✓".green(),
        movies,
        ratings,
        start.elapsed()
    );

    let mean_policy = if cli.observed_mean {
        MeanPolicy::ObservedOnly
    } else {
        MeanPolicy::AllColumns
    };
    let mut service = RecommendationService::from_config(catalog, &config, mean_policy)?;
    let fallback = config.fallback_poster_url.as_str();

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => handle_interactive(&mut service, fallback).await?,
        Commands::Search { query } => handle_search(&service, &query),
        Commands::Recommend { title, limit } => {
            handle_recommend(&mut service, &title, limit, fallback).await
        }
        Commands::Top => handle_top(&mut service, fallback).await,
    }

    Ok(())
}

/// Handle the 'interactive' command
///
/// Blank input shows the top-rated grid; `quit`, `exit` or end of input
/// leaves the loop.
async fn handle_interactive(service: &mut Service, fallback: &str) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", "Movie Recommender".bold().blue());
    handle_top(service, fallback).await;

    loop {
        prompt("Movie title (blank for top rated, 'quit' to exit): ")?;
        let Some(input) = lines.next_line().await? else {
            break;
        };
        let query = input.trim();

        match query {
            "quit" | "exit" => break,
            "" => {
                handle_top(service, fallback).await;
                continue;
            }
            _ => {}
        }

        let choices = service.search(query);
        if choices.is_empty() {
            display::print_no_match();
            continue;
        }

        display::print_choices(&choices);
        prompt(&format!("Pick [1-{}, Enter = 1]: ", choices.len()))?;
        let Some(pick) = read_choice(&mut lines, choices.len()).await? else {
            println!("{}", "Not a valid choice.".yellow());
            continue;
        };

        show_recommendations(service, choices[pick].movie_id, DEFAULT_NEIGHBOR_COUNT, fallback)
            .await;
    }

    println!("Bye!");
    Ok(())
}

/// Handle the 'search' command
fn handle_search(service: &Service, query: &str) {
    let choices = service.search(query);
    if choices.is_empty() {
        display::print_no_match();
        return;
    }
    println!("{}", format!("Search results for '{query}':").bold().blue());
    display::print_choices(&choices);
}

/// Handle the 'recommend' command
async fn handle_recommend(service: &mut Service, title: &str, limit: usize, fallback: &str) {
    match service.search(title).into_iter().next() {
        Some(best) => show_recommendations(service, best.movie_id, limit, fallback).await,
        None => display::print_no_match(),
    }
}

/// Handle the 'top' command
async fn handle_top(service: &mut Service, fallback: &str) {
    let top = service.top_rated().await;
    if top.is_empty() {
        println!("{}", "No movies have enough ratings to rank.".yellow());
        return;
    }
    display::print_grid("Top 10 Movies:", &top, fallback);
}

async fn show_recommendations(
    service: &mut Service,
    movie_id: data_loader::MovieId,
    limit: usize,
    fallback: &str,
) {
    match service.recommend(movie_id, limit).await {
        Ok(recs) => {
            display::print_selected(&recs.selected, fallback);
            if recs.neighbors.is_empty() {
                display::print_no_match();
            } else {
                display::print_grid("Recommended Movies:", &recs.neighbors, fallback);
            }
        }
        Err(err) => {
            println!("{}", err.to_string().yellow());
            display::print_no_match();
        }
    }
}

fn prompt(text: &str) -> Result<()> {
    print!("{text}");
    std::io::stdout().flush()?;
    Ok(())
}

/// Read a 1-based pick; Enter selects the first candidate
async fn read_choice(lines: &mut Lines<BufReader<Stdin>>, count: usize) -> Result<Option<usize>> {
    let input = lines.next_line().await?.unwrap_or_default();
    Ok(parse_choice(&input, count))
}

/// 0-based index for a 1-based answer, `None` when out of range
fn parse_choice(input: &str, count: usize) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() {
        return (count > 0).then_some(0);
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Some(n - 1),
        _ => None,
    }
}
