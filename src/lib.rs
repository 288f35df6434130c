//! Pokedex CLI Library
//!
//! This module exposes the cache, API client, and REPL modules for use in
//! integration tests.

pub mod cache;
pub mod catch;
pub mod cli;
pub mod commands;
pub mod data;
pub mod repl;
