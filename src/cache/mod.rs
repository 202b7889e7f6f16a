//! Cache module for storing forecast responses to disk
//!
//! This module provides a cache manager that persists decoded forecast
//! snapshots to the filesystem under keys derived from the request shape.
//! Entries stay usable for a fixed freshness window (one hour); stale or
//! unreadable entries are treated as misses and overwritten on the next fetch.

mod key;
mod manager;

pub use key::generate_key;
pub use manager::{CacheError, CacheManager, FRESHNESS_WINDOW_SECS};
