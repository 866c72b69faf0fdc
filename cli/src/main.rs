mod commands;
mod config;
mod server;
mod spoonacular;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;

use crate::commands::{cmd_search, cmd_show};
use crate::config::Config;
use crate::spoonacular::SpoonacularClient;
use recipebook_core::cache::RecipeCache;
use recipebook_core::models::{MAX_PAGE_SIZE, SearchRequest};
use recipebook_core::service::RecipeService;

#[derive(Parser)]
#[command(
    name = "recipebook",
    version,
    about = "Discover recipes from Spoonacular, with an in-memory cache",
    long_about = "Discover recipes from Spoonacular, with an in-memory cache.\n\n\
        Set SPOONACULAR_API_KEY to enable remote searches."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,
        /// Address to bind to (use 0.0.0.0 to expose to network)
        #[arg(short, long, default_value = "127.0.0.1")]
        bind: String,
        /// Start with an empty cache instead of the sample recipes
        #[arg(long)]
        no_samples: bool,
    },
    /// Search recipes (featured recipes when no query is given)
    Search {
        /// Free-text query
        query: Option<String>,
        /// Cuisine filter, e.g. "italian"
        #[arg(long)]
        cuisine: Option<String>,
        /// Diet filter, e.g. "vegetarian"
        #[arg(long)]
        diet: Option<String>,
        /// Dish type filter, e.g. "dessert"
        #[arg(long = "type")]
        dish_type: Option<String>,
        /// Maximum number of recipes to show
        #[arg(short, long, default_value_t = 12, value_parser = clap::value_parser!(u16).range(1..))]
        limit: u16,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a recipe with ingredients and instructions
    Show {
        /// Recipe ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env();
    let client = SpoonacularClient::new(config.api_key, &config.base_url)?;

    match cli.command {
        Commands::Serve {
            port,
            bind,
            no_samples,
        } => {
            let cache = if no_samples {
                RecipeCache::new()
            } else {
                RecipeCache::seeded()
            };
            server::start_server(RecipeService::new(cache, client), port, &bind).await
        }
        Commands::Search {
            query,
            cuisine,
            diet,
            dish_type,
            limit,
            json,
        } => {
            let page_size = u32::from(limit).min(MAX_PAGE_SIZE);
            let request = SearchRequest::default()
                .with_query(query.as_deref())
                .with_cuisine(cuisine.as_deref())
                .with_diet(diet.as_deref())
                .with_dish_type(dish_type.as_deref())
                .with_page(page_size, 0)?;
            let service = RecipeService::new(RecipeCache::seeded(), client);
            cmd_search(&service, request, usize::from(limit), json).await
        }
        Commands::Show { id, json } => {
            let service = RecipeService::new(RecipeCache::seeded(), client);
            cmd_show(&service, &id, json).await
        }
    }
}
