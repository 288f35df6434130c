//! PokeAPI client with response caching
//!
//! Every fetch goes through the shared response cache keyed by the full
//! request URL: a hit skips the network entirely, a miss performs the HTTP
//! GET and stores the raw body before returning it. Typed fetchers decode
//! the cached bytes into the models in `crate::data`.

use bytes::Bytes;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use super::{LocationArea, LocationAreaPage, Pokemon};
use crate::cache::ResponseCache;

/// Base URL for the PokeAPI v2 endpoints
const POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Errors that can occur when fetching PokeAPI resources
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("request failed with status code {0}")]
    Status(u16),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for fetching PokeAPI resources through the response cache
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    /// HTTP client used on cache misses
    http: Client,
    /// Shared response cache keyed by request URL
    cache: ResponseCache,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl PokeApiClient {
    /// Creates a new client sharing the given response cache
    pub fn new(cache: ResponseCache) -> Self {
        Self {
            http: Client::new(),
            cache,
            base_url: POKEAPI_BASE_URL.to_string(),
        }
    }

    /// Creates a new client with a custom base URL (for testing)
    #[cfg(test)]
    pub fn with_base_url(cache: ResponseCache, base_url: String) -> Self {
        Self {
            http: Client::new(),
            cache,
            base_url,
        }
    }

    /// Fetches the raw response body for `url`, consulting the cache first
    ///
    /// On a miss the body is fetched over HTTP and inserted into the cache
    /// before being returned, so a repeated request for the same URL inside
    /// the TTL costs no network round trip. Responses with a status code
    /// above 299 are an error and are not cached.
    ///
    /// # Arguments
    /// * `url` - Full request URL, which doubles as the cache key
    ///
    /// # Returns
    /// * `Ok(Bytes)` - The response body, possibly served from cache
    /// * `Err(ApiError)` - If the request fails or the status is an error
    pub async fn fetch_bytes(&self, url: &str) -> Result<Bytes, ApiError> {
        if let Some(cached) = self.cache.get(url) {
            debug!(url, "Cache hit");
            return Ok(cached);
        }
        debug!(url, "Cache miss, fetching");

        let response = self.http.get(url).send().await?;
        let status = response.status().as_u16();
        if status > 299 {
            return Err(ApiError::Status(status));
        }

        let body = response.bytes().await?;
        self.cache.insert(url, body.clone());
        Ok(body)
    }

    /// Fetches one page of the location area listing
    ///
    /// `url` is a paging cursor taken from a previous page's envelope;
    /// `None` fetches the first page.
    pub async fn fetch_location_page(
        &self,
        url: Option<&str>,
    ) -> Result<LocationAreaPage, ApiError> {
        let first_page = format!("{}/location-area/", self.base_url);
        let url = url.unwrap_or(&first_page);

        let body = self.fetch_bytes(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetches a location area by name or id
    pub async fn fetch_location_area(&self, name: &str) -> Result<LocationArea, ApiError> {
        let url = format!("{}/location-area/{}/", self.base_url, name);

        let body = self.fetch_bytes(&url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetches a pokemon by name or id
    pub async fn fetch_pokemon(&self, name: &str) -> Result<Pokemon, ApiError> {
        let url = format!("{}/pokemon/{}", self.base_url, name);

        let body = self.fetch_bytes(&url).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
