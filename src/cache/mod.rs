//! Cache module for memoizing raw API responses in memory
//!
//! This module provides a concurrency-safe response cache with a single
//! configurable TTL (time-to-live). Entries expire lazily on lookup and are
//! physically reclaimed by a background reaper task, so repeated requests
//! for the same URL within the TTL never touch the network twice while the
//! map stays bounded over time.

mod store;

pub use store::ResponseCache;
