//! Interactive REPL for the Pokedex CLI
//!
//! This module owns the read-eval-print loop, the per-command handlers,
//! and the session state they share: paging cursors for the location area
//! listing and the pokemon caught so far.

use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

use std::io::{self, Write};
use std::time::Duration;

use crate::catch::{catch_rate, roll_shakes, shake_threshold, CatchOutcome};
use crate::commands::{clean_input, Command};
use crate::data::{ApiError, LocationAreaPage, PokeApiClient};

/// Pause between shake ticks during a catch attempt
const SHAKE_DELAY: Duration = Duration::from_millis(500);

/// Error types for command handlers
///
/// The REPL loop prints these as `Error: <message>`, so each message reads
/// as a full sentence addressed to the user.
#[derive(Debug, Error)]
pub enum CommandError {
    /// explore was called without a location area
    #[error("you must provide a name or id")]
    MissingAreaName,

    /// catch was called without a pokemon
    #[error("please include the pokemon name")]
    MissingCatchName,

    /// inspect was called without a pokemon
    #[error("please provide a name for the pokemon")]
    MissingInspectName,

    /// inspect only works on pokemon in the session pokedex
    #[error("you have not caught that pokemon")]
    NotCaught,

    /// The location area response could not be decoded
    #[error("error parsing location data {0}")]
    AreaParse(serde_json::Error),

    /// The pokemon fetch for a catch attempt failed
    #[error("there was an error getting the result: {0}")]
    CatchFetch(ApiError),

    /// The pokemon response for a catch attempt could not be decoded
    #[error("there was an error parsing the pokemon data: {0}")]
    CatchParse(serde_json::Error),

    /// Any other API failure, reported as-is
    #[error("{0}")]
    Api(#[from] ApiError),
}

/// A pokemon recorded in the session pokedex
#[derive(Debug, Clone)]
pub struct CaughtPokemon {
    /// Name reported by the API when it was caught
    pub name: String,
    /// When the catch happened
    pub caught_at: DateTime<Local>,
}

/// REPL session state and command handlers
pub struct Repl {
    /// API client; every fetch goes through its response cache
    client: PokeApiClient,
    /// Paging cursor for the next location area page
    next_url: Option<String>,
    /// Paging cursor for the previous location area page
    previous_url: Option<String>,
    /// Pokemon caught this session, in catch order
    caught: Vec<CaughtPokemon>,
    /// Flag indicating the REPL should stop after the current command
    should_quit: bool,
    /// RNG driving catch attempts
    rng: StdRng,
}

impl Repl {
    /// Creates a new REPL session with empty cursors and pokedex
    pub fn new(client: PokeApiClient) -> Self {
        Self {
            client,
            next_url: None,
            previous_url: None,
            caught: Vec::new(),
            should_quit: false,
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a REPL session with a deterministic RNG (for testing)
    #[cfg(test)]
    pub fn with_seeded_rng(client: PokeApiClient, seed: u64) -> Self {
        Self {
            client,
            next_url: None,
            previous_url: None,
            caught: Vec::new(),
            should_quit: false,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Runs the prompt loop until the exit command or end of input
    ///
    /// Each line is normalized with [`clean_input`]; the first word selects
    /// the command and the rest are passed to it as arguments. Blank lines
    /// reprompt, unknown words are reported, and handler errors are printed
    /// without ending the session.
    pub async fn run(&mut self) -> io::Result<()> {
        let stdin = tokio::io::stdin();
        let mut lines = BufReader::new(stdin).lines();

        loop {
            print!("Pokedex > ");
            io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                // End of input ends the session
                break;
            };

            let words = clean_input(&line);
            let Some((word, args)) = words.split_first() else {
                continue;
            };

            match Command::parse(word) {
                Some(command) => {
                    if let Err(err) = self.dispatch(command, args).await {
                        println!("Error: {err}");
                    }
                    if self.should_quit {
                        break;
                    }
                }
                None => println!("unknown command: {word}"),
            }
        }

        Ok(())
    }

    /// Routes a parsed command to its handler
    async fn dispatch(&mut self, command: Command, args: &[String]) -> Result<(), CommandError> {
        match command {
            Command::Exit => self.handle_exit(),
            Command::Help => self.handle_help(),
            Command::Map => self.handle_map().await,
            Command::MapBack => self.handle_map_back().await,
            Command::Explore => self.handle_explore(args).await,
            Command::Catch => self.handle_catch(args).await,
            Command::Inspect => self.handle_inspect(args).await,
            Command::Pokedex => self.handle_pokedex(),
        }
    }

    /// Says goodbye and flags the loop to stop
    fn handle_exit(&mut self) -> Result<(), CommandError> {
        print!("Closing the Pokedex... Goodbye!");
        let _ = io::stdout().flush();
        self.should_quit = true;
        Ok(())
    }

    /// Prints the command list
    fn handle_help(&mut self) -> Result<(), CommandError> {
        println!("Welcome to the Pokedex!");
        for command in Command::all() {
            println!(" {}: {}", command.name(), command.description());
        }
        Ok(())
    }

    /// Pages forward through the location area listing
    async fn handle_map(&mut self) -> Result<(), CommandError> {
        let page = self
            .client
            .fetch_location_page(self.next_url.as_deref())
            .await?;
        self.show_page(page);
        Ok(())
    }

    /// Pages backward through the location area listing
    async fn handle_map_back(&mut self) -> Result<(), CommandError> {
        let Some(url) = self.previous_url.clone() else {
            println!("You're on the first page");
            return Ok(());
        };

        let page = self.client.fetch_location_page(Some(&url)).await?;
        self.show_page(page);
        Ok(())
    }

    /// Updates the paging cursors from a page envelope and lists its areas
    fn show_page(&mut self, page: LocationAreaPage) {
        self.next_url = page.next;
        self.previous_url = page.previous;
        for area in &page.results {
            println!("{}", area.name);
        }
    }

    /// Lists the pokemon encountered in a location area
    async fn handle_explore(&mut self, args: &[String]) -> Result<(), CommandError> {
        let Some(name) = args.first() else {
            return Err(CommandError::MissingAreaName);
        };

        let area = match self.client.fetch_location_area(name).await {
            Ok(area) => area,
            Err(ApiError::Parse(err)) => return Err(CommandError::AreaParse(err)),
            Err(err) => return Err(CommandError::Api(err)),
        };

        println!("exploring {}", area.name);
        println!("found pokemon:");

        if area.pokemon_encounters.is_empty() {
            println!("No pokemon found in this area");
            return Ok(());
        }
        for encounter in &area.pokemon_encounters {
            println!("- {}", encounter.pokemon.name);
        }
        Ok(())
    }

    /// Throws a pokeball: fetches the pokemon, rolls the shake checks, and
    /// records a success in the session pokedex
    async fn handle_catch(&mut self, args: &[String]) -> Result<(), CommandError> {
        let Some(name) = args.first() else {
            return Err(CommandError::MissingCatchName);
        };

        let pokemon = match self.client.fetch_pokemon(name).await {
            Ok(pokemon) => pokemon,
            Err(ApiError::Parse(err)) => return Err(CommandError::CatchParse(err)),
            Err(err) => return Err(CommandError::CatchFetch(err)),
        };

        println!("catch {}", pokemon.name);
        println!("Throwing a Pokeball at {}...", pokemon.name);

        // A missing base experience counts as zero, the easiest catch
        let rate = catch_rate(pokemon.base_experience.unwrap_or(0));
        let outcome = roll_shakes(&mut self.rng, shake_threshold(rate));

        match outcome {
            CatchOutcome::Caught => {
                self.shake(4).await;
                println!("\nCaught!");
                println!("{} was caught!", pokemon.name);
                self.record_catch(&pokemon.name);
            }
            CatchOutcome::BrokeOut(shakes) => {
                self.shake(shakes).await;
                println!("broke out after {shakes} shakes");
                println!("{} escaped!", pokemon.name);
            }
        }
        Ok(())
    }

    /// Prints the shake animation, one tick per passed check
    async fn shake(&self, count: u32) {
        for _ in 0..count {
            print!("shake...");
            let _ = io::stdout().flush();
            tokio::time::sleep(SHAKE_DELAY).await;
        }
    }

    /// Adds a pokemon to the session pokedex, keeping one entry per name
    fn record_catch(&mut self, name: &str) {
        if self.is_caught(name) {
            return;
        }
        self.caught.push(CaughtPokemon {
            name: name.to_string(),
            caught_at: Local::now(),
        });
    }

    /// Whether a pokemon is in the session pokedex
    fn is_caught(&self, name: &str) -> bool {
        self.caught.iter().any(|p| p.name == name)
    }

    /// Shows the details of a caught pokemon
    async fn handle_inspect(&mut self, args: &[String]) -> Result<(), CommandError> {
        let Some(name) = args.first() else {
            return Err(CommandError::MissingInspectName);
        };
        if !self.is_caught(name) {
            return Err(CommandError::NotCaught);
        }

        // The catch already cached this response, so inspecting a pokemon
        // caught within the TTL costs no network round trip
        let pokemon = self.client.fetch_pokemon(name).await?;

        println!("Name: {}", pokemon.name);
        println!("Height: {}", pokemon.height);
        println!("Weight: {}", pokemon.weight);
        println!("Stats:");
        for stat in &pokemon.stats {
            println!("  -{}: {}", stat.stat.name, stat.base_stat);
        }
        println!("Types:");
        for type_info in &pokemon.types {
            println!("  - {}", type_info.kind.name);
        }
        Ok(())
    }

    /// Lists every pokemon caught this session, in catch order
    fn handle_pokedex(&mut self) -> Result<(), CommandError> {
        if self.caught.is_empty() {
            println!("You are yet to catch any pokemon");
            return Ok(());
        }
        println!("Your pokemon:");
        for pokemon in &self.caught {
            println!("- {}", pokemon.name);
        }
        Ok(())
    }
}
