//! REPL command table and input normalization

/// Commands the REPL can dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Leave the REPL
    Exit,
    /// Print the command list
    Help,
    /// Page forward through location areas
    Map,
    /// Page backward through location areas
    MapBack,
    /// List the pokemon found in a location area
    Explore,
    /// Throw a pokeball at a pokemon
    Catch,
    /// Show details for a caught pokemon
    Inspect,
    /// List every caught pokemon
    Pokedex,
}

impl Command {
    /// Returns all commands in the order the help message lists them
    pub fn all() -> &'static [Command] {
        &[
            Command::Exit,
            Command::Help,
            Command::Map,
            Command::MapBack,
            Command::Explore,
            Command::Catch,
            Command::Inspect,
            Command::Pokedex,
        ]
    }

    /// The word that invokes this command
    pub fn name(&self) -> &'static str {
        match self {
            Command::Exit => "exit",
            Command::Help => "help",
            Command::Map => "map",
            Command::MapBack => "mapb",
            Command::Explore => "explore",
            Command::Catch => "catch",
            Command::Inspect => "inspect",
            Command::Pokedex => "pokedex",
        }
    }

    /// One-line description shown by the help command
    pub fn description(&self) -> &'static str {
        match self {
            Command::Exit => "Exit the Pokedex",
            Command::Help => "Displays a help message",
            Command::Map => "Get all location areas",
            Command::MapBack => "get all previous location areas",
            Command::Explore => "explores the highlighted areas",
            Command::Catch => "catches a pokemon",
            Command::Inspect => "see details about a pokemon",
            Command::Pokedex => "view caught pokemon",
        }
    }

    /// Looks up a command by its invoking word
    pub fn parse(word: &str) -> Option<Command> {
        Command::all().iter().copied().find(|c| c.name() == word)
    }
}

/// Normalizes a line of user input into lowercase words
///
/// Lowercases the line and splits it on whitespace, so a blank line yields
/// no words at all.
pub fn clean_input(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
