//! Core data models for the Pokedex CLI
//!
//! This module contains the response types decoded from the PokeAPI
//! endpoints the application consumes: the paginated location area listing,
//! location area details with their pokemon encounters, and individual
//! pokemon records. Fields not displayed by any command are left undeclared
//! and skipped during decoding.

pub mod pokeapi;

pub use pokeapi::{ApiError, PokeApiClient};

use serde::Deserialize;

/// A name and URL pair, PokeAPI's shape for linked resources
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    /// Resource name (doubles as the path segment for detail lookups)
    pub name: String,
    /// Canonical URL of the resource
    pub url: String,
}

/// One page of the paginated location area listing
#[derive(Debug, Clone, Deserialize)]
pub struct LocationAreaPage {
    /// URL of the page after this one; `None` on the last page
    pub next: Option<String>,
    /// URL of the page before this one; `None` on the first page
    pub previous: Option<String>,
    /// The location areas on this page
    pub results: Vec<NamedResource>,
}

/// A location area and the pokemon that can be encountered in it
#[derive(Debug, Clone, Deserialize)]
pub struct LocationArea {
    /// Numeric id of the area
    pub id: u32,
    /// Lowercase area name
    pub name: String,
    /// Possible encounters; empty for areas with no wild pokemon
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

/// A single possible encounter within a location area
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonEncounter {
    /// The encounterable pokemon
    pub pokemon: NamedResource,
}

/// A pokemon record with the fields the catch and inspect commands use
#[derive(Debug, Clone, Deserialize)]
pub struct Pokemon {
    /// National dex id
    pub id: u32,
    /// Lowercase pokemon name
    pub name: String,
    /// Experience yield, the input to the catch rate; null for a few
    /// special forms, which are treated as zero and always catch
    #[serde(default)]
    pub base_experience: Option<u32>,
    /// Height in decimeters
    pub height: u32,
    /// Weight in hectograms
    pub weight: u32,
    /// Base stat lines
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    /// Type slots
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

/// A single base stat line for a pokemon
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonStat {
    /// The stat's value for this pokemon
    pub base_stat: u32,
    /// The stat resource (hp, attack, ...)
    pub stat: NamedResource,
}

/// One of a pokemon's type slots
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonType {
    /// The type resource; only the name is displayed
    #[serde(rename = "type")]
    pub kind: NamedResource,
}
