//! Pokedex CLI - an interactive PokeAPI browser
//!
//! A REPL that pages through location areas, explores them, and catches
//! pokemon, with every API response held in a TTL cache so repeated
//! lookups inside the expiry window cost no network round trips.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pokedex::cache::ResponseCache;
use pokedex::cli::{Cli, StartupConfig};
use pokedex::data::PokeApiClient;
use pokedex::repl::Repl;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Log to stderr so output never interleaves with the prompt
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "pokedex=info,warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };

    let cache = ResponseCache::new(config.cache_ttl);
    let client = PokeApiClient::new(cache);

    let mut repl = Repl::new(client);
    repl.run().await?;

    Ok(())
}
