//! In-memory response cache with entry expiry
//!
//! Stores raw response bodies keyed by request URL. Every entry shares one
//! cache-wide TTL: lookups treat an entry that has reached the TTL as a miss,
//! and a background reaper task physically removes expired entries on a fixed
//! period so the map cannot grow without bound.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::debug;

/// A single cached response body with its insertion time
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The raw response bytes
    value: Bytes,
    /// When the entry was inserted or last overwritten
    created_at: Instant,
}

impl CacheEntry {
    /// Returns true once the entry has been alive for at least `ttl`
    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}

/// State shared between cache handles and the reaper task
#[derive(Debug)]
struct Store {
    /// All live entries, guarded by a single lock
    entries: RwLock<HashMap<String, CacheEntry>>,
    /// How long an entry stays fresh after insertion
    ttl: Duration,
}

impl Store {
    /// Removes every entry that has outlived the TTL
    fn sweep(&self) {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(self.ttl));
        let swept = before - entries.len();
        drop(entries);

        if swept > 0 {
            debug!(swept, "Reaped expired cache entries");
        }
    }
}

/// Concurrency-safe in-memory cache for raw API responses
///
/// Created once at startup with a fixed TTL and shared by cloning: every
/// clone is a cheap handle onto the same map. `new` spawns a background
/// reaper that wakes once per TTL period and removes expired entries; the
/// reaper stops when `shutdown` is called or when every handle has been
/// dropped.
///
/// The cache knows nothing about HTTP. Keys are opaque strings (callers use
/// request URLs) and values are opaque byte sequences; an empty body caches
/// like any other.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    store: Arc<Store>,
    /// Held by every handle; the reaper exits once all senders are gone
    shutdown_tx: mpsc::Sender<()>,
}

impl ResponseCache {
    /// Creates an empty cache and spawns its background reaper
    ///
    /// The reaper wakes every `ttl`, so an expired entry occupies memory for
    /// at most one extra period before it is reclaimed. Must be called from
    /// within a tokio runtime.
    ///
    /// # Panics
    /// Panics if `ttl` is zero. Callers validate the configured TTL before
    /// construction; see `StartupConfig::from_cli`.
    pub fn new(ttl: Duration) -> Self {
        assert!(!ttl.is_zero(), "cache TTL must be positive");

        let store = Arc::new(Store {
            entries: RwLock::new(HashMap::new()),
            ttl,
        });
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let reaper_store = Arc::clone(&store);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(ttl);
            // Skip the first tick (immediate)
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        reaper_store.sweep();
                    }
                    // Fires on an explicit shutdown and also when every
                    // handle (sender) has been dropped
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                }
            }
        });

        Self { store, shutdown_tx }
    }

    /// Inserts a value under `key`, replacing any previous entry
    ///
    /// Overwriting restarts the entry's lifetime from now.
    pub fn insert(&self, key: &str, value: Bytes) {
        let entry = CacheEntry {
            value,
            created_at: Instant::now(),
        };
        self.store.entries.write().insert(key.to_string(), entry);
    }

    /// Returns the cached value for `key` if present and still fresh
    ///
    /// An entry whose age has reached the TTL reads as a miss even before
    /// the reaper removes it; callers cannot tell an expired entry from one
    /// that was never inserted. The lookup itself never modifies the map.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let entries = self.store.entries.read();
        let entry = entries.get(key)?;
        if entry.is_expired(self.store.ttl) {
            return None;
        }
        Some(entry.value.clone())
    }

    /// Number of entries physically present, including any expired ones
    /// still awaiting the next sweep
    pub fn len(&self) -> usize {
        self.store.entries.read().len()
    }

    /// Returns true when no entries are physically present
    pub fn is_empty(&self) -> bool {
        self.store.entries.read().is_empty()
    }

    /// Stops the background reaper
    ///
    /// Lookups on remaining handles keep working and expiry is still
    /// enforced on read; only physical reclamation stops.
    #[allow(dead_code)]
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "https://pokeapi.co/api/v2/location-area/";

    #[tokio::test]
    async fn test_insert_then_get_returns_value() {
        let cache = ResponseCache::new(Duration::from_secs(60));

        cache.insert(KEY, Bytes::from_static(b"{\"results\":[]}"));

        assert_eq!(cache.get(KEY), Some(Bytes::from_static(b"{\"results\":[]}")));
    }

    #[tokio::test]
    async fn test_get_returns_none_for_unknown_key() {
        let cache = ResponseCache::new(Duration::from_secs(60));

        assert!(cache.get("https://pokeapi.co/api/v2/pokemon/mew").is_none());
    }

    #[tokio::test]
    async fn test_empty_value_is_still_a_hit() {
        let cache = ResponseCache::new(Duration::from_secs(60));

        cache.insert(KEY, Bytes::new());

        assert_eq!(cache.get(KEY), Some(Bytes::new()));
    }

    #[tokio::test]
    async fn test_insert_overwrites_previous_value() {
        let cache = ResponseCache::new(Duration::from_secs(60));

        cache.insert(KEY, Bytes::from_static(b"first"));
        cache.insert(KEY, Bytes::from_static(b"second"));

        assert_eq!(cache.get(KEY), Some(Bytes::from_static(b"second")));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_hits_just_inside_the_ttl() {
        let cache = ResponseCache::new(Duration::from_secs(30));
        cache.insert(KEY, Bytes::from_static(b"payload"));

        tokio::time::sleep(Duration::from_secs(29)).await;

        assert_eq!(cache.get(KEY), Some(Bytes::from_static(b"payload")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_misses_once_the_ttl_has_elapsed() {
        let cache = ResponseCache::new(Duration::from_secs(30));
        cache.insert(KEY, Bytes::from_static(b"payload"));

        // Age equal to the TTL already counts as expired
        tokio::time::sleep(Duration::from_secs(30)).await;

        assert!(cache.get(KEY).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_restarts_the_entry_lifetime() {
        let cache = ResponseCache::new(Duration::from_secs(10));

        cache.insert(KEY, Bytes::from_static(b"first"));
        tokio::time::sleep(Duration::from_secs(6)).await;
        cache.insert(KEY, Bytes::from_static(b"second"));
        tokio::time::sleep(Duration::from_secs(6)).await;

        // Twelve seconds after the first insert but only six after the
        // overwrite, so the entry is still fresh
        assert_eq!(cache.get(KEY), Some(Bytes::from_static(b"second")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_reclaims_expired_entries_without_lookups() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        for i in 0..5 {
            let key = format!("https://pokeapi.co/api/v2/pokemon/{i}");
            cache.insert(&key, Bytes::from_static(b"payload"));
        }
        assert_eq!(cache.len(), 5);

        // Two full periods with no lookups; the reaper alone reclaims
        tokio::time::sleep(Duration::from_secs(121)).await;

        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_leaves_fresh_entries_alone() {
        let cache = ResponseCache::new(Duration::from_secs(10));

        cache.insert("https://pokeapi.co/api/v2/pokemon/old", Bytes::from_static(b"old"));
        tokio::time::sleep(Duration::from_secs(7)).await;
        cache.insert("https://pokeapi.co/api/v2/pokemon/young", Bytes::from_static(b"young"));
        tokio::time::sleep(Duration::from_secs(4)).await;

        // The sweep at the ten second mark removed only the older entry
        assert_eq!(cache.len(), 1);
        assert!(cache.get("https://pokeapi.co/api/v2/pokemon/old").is_none());
        assert_eq!(
            cache.get("https://pokeapi.co/api/v2/pokemon/young"),
            Some(Bytes::from_static(b"young"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_reclamation_but_not_lookups() {
        let cache = ResponseCache::new(Duration::from_secs(10));
        let handle = cache.clone();

        cache.shutdown().await;
        handle.insert(KEY, Bytes::from_static(b"payload"));
        tokio::time::sleep(Duration::from_secs(30)).await;

        // No sweep ran, so the entry is still physically present, but the
        // freshness check on get still hides it
        assert_eq!(handle.len(), 1);
        assert!(handle.get(KEY).is_none());
    }

    // The tasks only contend on the lock when they run on separate
    // worker threads
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_tasks_do_not_lose_disjoint_entries() {
        let cache = ResponseCache::new(Duration::from_secs(60));

        let mut handles = Vec::new();
        for task in 0..8u32 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..50u32 {
                    let key = format!("https://pokeapi.co/api/v2/pokemon/{task}-{i}");
                    cache.insert(&key, Bytes::from(format!("payload-{task}-{i}")));
                    // Every task also hammers one shared key
                    cache.insert(KEY, Bytes::from_static(b"shared"));
                    assert!(cache.get(&key).is_some());
                }
            }));
        }
        for handle in futures::future::join_all(handles).await {
            handle.expect("cache task panicked");
        }

        for task in 0..8u32 {
            for i in 0..50u32 {
                let key = format!("https://pokeapi.co/api/v2/pokemon/{task}-{i}");
                assert_eq!(cache.get(&key), Some(Bytes::from(format!("payload-{task}-{i}"))));
            }
        }
        assert_eq!(cache.get(KEY), Some(Bytes::from_static(b"shared")));
        assert_eq!(cache.len(), 8 * 50 + 1);
    }

    #[tokio::test]
    #[should_panic(expected = "cache TTL must be positive")]
    async fn test_zero_ttl_panics() {
        let _ = ResponseCache::new(Duration::ZERO);
    }
}
