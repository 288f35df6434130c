//! Command-line interface parsing for the Pokedex CLI
//!
//! This module handles parsing of CLI arguments using clap, including the
//! --cache-ttl flag that controls how long fetched API responses stay
//! cached.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The cache TTL must be a positive number of seconds
    #[error("Invalid cache TTL: '{0}'. The TTL must be at least 1 second")]
    InvalidCacheTtl(u64),
}

/// Pokedex CLI - browse PokeAPI location areas and catch pokemon
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "A Pokedex REPL backed by PokeAPI")]
#[command(version)]
pub struct Cli {
    /// How long fetched API responses stay cached, in seconds
    ///
    /// Examples:
    ///   pokedex                    # Default 300 second cache
    ///   pokedex --cache-ttl 30     # Expire cached responses after 30s
    #[arg(long, value_name = "SECONDS", default_value_t = 300)]
    pub cache_ttl: u64,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// How long cached API responses stay valid
    pub cache_ttl: Duration,
}

impl Default for StartupConfig {
    fn default() -> Self {
        StartupConfig {
            cache_ttl: Duration::from_secs(300),
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with the validated cache TTL
    /// * `Err(CliError)` if the TTL is zero
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.cache_ttl == 0 {
            return Err(CliError::InvalidCacheTtl(cli.cache_ttl));
        }
        Ok(StartupConfig {
            cache_ttl: Duration::from_secs(cli.cache_ttl),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args_uses_default_ttl() {
        let cli = Cli::parse_from(["pokedex"]);
        assert_eq!(cli.cache_ttl, 300);
    }

    #[test]
    fn test_cli_parse_cache_ttl() {
        let cli = Cli::parse_from(["pokedex", "--cache-ttl", "30"]);
        assert_eq!(cli.cache_ttl, 30);
    }

    #[test]
    fn test_startup_config_default() {
        let config = StartupConfig::default();
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_startup_config_from_cli_default() {
        let cli = Cli::parse_from(["pokedex"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_startup_config_from_cli_custom_ttl() {
        let cli = Cli::parse_from(["pokedex", "--cache-ttl", "45"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.cache_ttl, Duration::from_secs(45));
    }

    #[test]
    fn test_startup_config_from_cli_zero_ttl() {
        let cli = Cli::parse_from(["pokedex", "--cache-ttl", "0"]);
        let result = StartupConfig::from_cli(&cli);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid cache TTL"));
    }
}
