//! In-memory query cache with in-flight coalescing.
//!
//! Each key holds either a settled [`Resolution`] or a shared in-flight
//! fetch. The map lock is only taken to read or swap a slot and is never held
//! across an `.await`: the fetch itself runs inside a [`Shared`] future that
//! any waiter can drive, so a caller that gives up does not stall the others.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use zilnames_core::Resolution;

// ═══════════════════════════════════════════════════════════════════════════════
// KEYS & CONFIG
// ═══════════════════════════════════════════════════════════════════════════════

/// Operation a cache entry belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    /// Forward lookup, name → address
    Address,
    /// Reverse lookup, address → name
    Name,
    /// Avatar text record, name → URL
    Avatar,
}

impl QueryKind {
    /// Short label used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            QueryKind::Address => "address",
            QueryKind::Name => "name",
            QueryKind::Avatar => "avatar",
        }
    }
}

/// Cache key. `input` must already be normalized by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    /// Operation kind
    pub kind: QueryKind,
    /// Normalized name or lower-case address
    pub input: String,
    /// Network the query runs against
    pub chain_id: u64,
}

impl CacheKey {
    /// Creates a key.
    pub fn new(kind: QueryKind, input: impl Into<String>, chain_id: u64) -> Self {
        Self {
            kind,
            input: input.into(),
            chain_id,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.kind.as_str(), self.input, self.chain_id)
    }
}

/// Cache configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries
    pub max_entries: usize,
    /// Lifetime of non-failed entries; `None` keeps them until invalidated
    pub success_ttl_seconds: Option<u64>,
    /// Lifetime of failed entries
    pub failure_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            success_ttl_seconds: None,
            failure_ttl_seconds: 10,
        }
    }
}

impl CacheConfig {
    /// Sets the failure lifetime.
    pub fn with_failure_ttl(mut self, seconds: u64) -> Self {
        self.failure_ttl_seconds = seconds;
        self
    }

    /// Sets the success lifetime.
    pub fn with_success_ttl(mut self, seconds: u64) -> Self {
        self.success_ttl_seconds = Some(seconds);
        self
    }

    fn ttl_for<V>(&self, resolution: &Resolution<V>) -> Option<Duration> {
        match resolution {
            Resolution::Failed(_) => Some(Duration::from_secs(self.failure_ttl_seconds)),
            _ => self.success_ttl_seconds.map(Duration::from_secs),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SLOTS
// ═══════════════════════════════════════════════════════════════════════════════

type SharedFetch<V> = Shared<BoxFuture<'static, Resolution<V>>>;

#[derive(Clone)]
struct CacheEntry<V> {
    resolution: Resolution<V>,
    fetched_at: Instant,
    invalidated: bool,
}

impl<V> CacheEntry<V> {
    fn is_stale(&self, config: &CacheConfig) -> bool {
        self.invalidated
            || config
                .ttl_for(&self.resolution)
                .is_some_and(|ttl| self.fetched_at.elapsed() >= ttl)
    }
}

enum Slot<V> {
    Ready(CacheEntry<V>),
    InFlight {
        generation: u64,
        future: SharedFetch<V>,
        /// Last settled value, shown while the refetch runs
        previous: Option<CacheEntry<V>>,
        /// Set when invalidated mid-flight; the result is published stale
        invalidated: bool,
    },
}

enum Lookup<V: Clone> {
    Hit(Resolution<V>),
    Attach(SharedFetch<V>),
    Miss,
}

/// Snapshot of one key: the `{ value, isLoading, error }` view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryState<V> {
    /// Latest settled outcome, if any
    pub resolution: Option<Resolution<V>>,
    /// A fetch for this key is in flight
    pub is_loading: bool,
    /// `resolution` is outdated (invalidated, expired, or being refetched)
    pub is_stale: bool,
    /// When `resolution` was fetched
    pub fetched_at: Option<Instant>,
}

impl<V> QueryState<V> {
    /// State of a key that has never been requested.
    pub fn idle() -> Self {
        Self {
            resolution: None,
            is_loading: false,
            is_stale: false,
            fetched_at: None,
        }
    }
}

/// Cache statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Requests answered from a fresh entry
    pub hits: u64,
    /// Requests that started a new fetch
    pub misses: u64,
    /// Requests that attached to an in-flight fetch
    pub coalesced: u64,
    /// Fetchers actually invoked
    pub fetches: u64,
    /// Keys currently held (settled or in flight)
    pub entries: usize,
    /// Keys with a fetch in flight
    pub in_flight: usize,
    /// Configured capacity
    pub capacity: usize,
}

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE
// ═══════════════════════════════════════════════════════════════════════════════

struct Inner<V> {
    slots: Mutex<HashMap<CacheKey, Slot<V>>>,
    config: CacheConfig,
    generation: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    coalesced: AtomicU64,
    fetches: AtomicU64,
}

impl<V: Clone> Inner<V> {
    /// Settles an in-flight slot if it still belongs to `generation`.
    fn publish(&self, key: &CacheKey, generation: u64, resolution: &Resolution<V>) {
        let mut slots = self.slots.lock();
        let invalidated = match slots.get(key) {
            Some(Slot::InFlight {
                generation: current,
                invalidated,
                ..
            }) if *current == generation => *invalidated,
            // Removed or superseded while in flight
            _ => return,
        };
        slots.insert(
            key.clone(),
            Slot::Ready(CacheEntry {
                resolution: resolution.clone(),
                fetched_at: Instant::now(),
                invalidated,
            }),
        );
    }
}

/// Keyed resolution cache.
///
/// Cloning is cheap and every clone shares the same entries.
pub struct QueryCache<V> {
    inner: Arc<Inner<V>>,
}

impl<V> Clone for QueryCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates a new cache with default configuration.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                slots: Mutex::new(HashMap::with_capacity(config.max_entries.min(1024))),
                config,
                generation: AtomicU64::new(0),
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
                coalesced: AtomicU64::new(0),
                fetches: AtomicU64::new(0),
            }),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.inner.config
    }

    /// Returns the cached outcome for `key`, or runs `fetcher` once.
    ///
    /// A fresh settled entry is returned without calling `fetcher`. If a fetch
    /// for `key` is already running, this call waits on it instead. Otherwise
    /// `fetcher` is invoked, its outcome (success or failure) is stored, and
    /// every waiter receives it. Dropping the returned future does not cancel
    /// the fetch for other waiters.
    ///
    /// The fetch only makes progress while some waiter polls it. If the last
    /// waiter is dropped, the slot stays in flight (and [`QueryCache::state`]
    /// keeps reporting `is_loading`) until the next caller for the key
    /// attaches and drives it to completion.
    pub async fn get_or_fetch<F, Fut>(&self, key: CacheKey, fetcher: F) -> Resolution<V>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Resolution<V>> + Send + 'static,
    {
        let future = {
            let mut slots = self.inner.slots.lock();

            let lookup = match slots.get(&key) {
                Some(Slot::Ready(entry)) if !entry.is_stale(&self.inner.config) => {
                    Lookup::Hit(entry.resolution.clone())
                }
                Some(Slot::InFlight { future, .. }) => Lookup::Attach(future.clone()),
                _ => Lookup::Miss,
            };

            match lookup {
                Lookup::Hit(resolution) => {
                    self.inner.hits.fetch_add(1, Ordering::Relaxed);
                    debug!(%key, "Cache hit");
                    return resolution;
                }
                Lookup::Attach(future) => {
                    self.inner.coalesced.fetch_add(1, Ordering::Relaxed);
                    debug!(%key, "Attaching to in-flight fetch");
                    future
                }
                Lookup::Miss => {
                    self.inner.misses.fetch_add(1, Ordering::Relaxed);
                    debug!(%key, "Cache miss, fetching");

                    let previous = match slots.remove(&key) {
                        Some(Slot::Ready(entry)) => Some(entry),
                        _ => None,
                    };
                    if previous.is_none() {
                        self.evict_if_full(&mut slots);
                    }

                    let generation = self.inner.generation.fetch_add(1, Ordering::Relaxed);
                    let future = self.claim(key.clone(), generation, fetcher);
                    slots.insert(
                        key,
                        Slot::InFlight {
                            generation,
                            future: future.clone(),
                            previous,
                            invalidated: false,
                        },
                    );
                    future
                }
            }
        };

        future.await
    }

    /// Builds the shared fetch. The fetcher runs on first poll, outside the lock.
    fn claim<F, Fut>(&self, key: CacheKey, generation: u64, fetcher: F) -> SharedFetch<V>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Resolution<V>> + Send + 'static,
    {
        let inner: Weak<Inner<V>> = Arc::downgrade(&self.inner);
        async move {
            if let Some(inner) = inner.upgrade() {
                inner.fetches.fetch_add(1, Ordering::Relaxed);
            }
            let resolution = fetcher().await;
            if let Some(inner) = inner.upgrade() {
                inner.publish(&key, generation, &resolution);
            }
            resolution
        }
        .boxed()
        .shared()
    }

    /// Makes room for one more key by dropping the oldest settled entries.
    ///
    /// In-flight slots are never evicted, so while more distinct keys are in
    /// flight than `max_entries` the map runs over capacity. The next insert
    /// after they settle trims it back.
    fn evict_if_full(&self, slots: &mut HashMap<CacheKey, Slot<V>>) {
        while slots.len() >= self.inner.config.max_entries {
            let oldest = slots
                .iter()
                .filter_map(|(k, slot)| match slot {
                    Slot::Ready(entry) => Some((k, entry.fetched_at)),
                    Slot::InFlight { .. } => None,
                })
                .min_by_key(|(_, fetched_at)| *fetched_at)
                .map(|(k, _)| k.clone());

            let Some(key) = oldest else {
                debug!(entries = slots.len(), "Cache over capacity with every slot in flight");
                return;
            };
            debug!(%key, "Evicting oldest entry");
            slots.remove(&key);
        }
    }

    /// Snapshot of one key.
    pub fn state(&self, key: &CacheKey) -> QueryState<V> {
        let slots = self.inner.slots.lock();
        match slots.get(key) {
            None => QueryState::idle(),
            Some(Slot::Ready(entry)) => QueryState {
                resolution: Some(entry.resolution.clone()),
                is_loading: false,
                is_stale: entry.is_stale(&self.inner.config),
                fetched_at: Some(entry.fetched_at),
            },
            Some(Slot::InFlight { previous, .. }) => QueryState {
                resolution: previous.as_ref().map(|e| e.resolution.clone()),
                is_loading: true,
                is_stale: previous.is_some(),
                fetched_at: previous.as_ref().map(|e| e.fetched_at),
            },
        }
    }

    /// Settled outcome for `key`, fresh or not.
    pub fn peek(&self, key: &CacheKey) -> Option<Resolution<V>> {
        self.state(key).resolution
    }

    /// Marks one entry stale. Returns false if the key is unknown.
    ///
    /// The stale value stays visible in [`state`](Self::state) until the
    /// next fetch settles.
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        let mut slots = self.inner.slots.lock();
        match slots.get_mut(key) {
            Some(slot) => {
                mark_invalidated(slot);
                debug!(%key, "Invalidated entry");
                true
            }
            None => false,
        }
    }

    /// Marks every entry for a network stale. Returns how many were marked.
    pub fn invalidate_network(&self, chain_id: u64) -> usize {
        let mut slots = self.inner.slots.lock();
        let mut count = 0;
        for (_, slot) in slots.iter_mut().filter(|(k, _)| k.chain_id == chain_id) {
            mark_invalidated(slot);
            count += 1;
        }
        debug!(chain_id, count, "Invalidated network entries");
        count
    }

    /// Removes an entry. An in-flight fetch for it still completes for its
    /// waiters but is not stored.
    pub fn remove(&self, key: &CacheKey) {
        self.inner.slots.lock().remove(key);
    }

    /// Clears all entries.
    pub fn clear(&self) {
        self.inner.slots.lock().clear();
    }

    /// Returns the number of keys held.
    pub fn len(&self) -> usize {
        self.inner.slots.lock().len()
    }

    /// Returns true if the cache holds nothing.
    pub fn is_empty(&self) -> bool {
        self.inner.slots.lock().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let slots = self.inner.slots.lock();
        let in_flight = slots
            .values()
            .filter(|s| matches!(s, Slot::InFlight { .. }))
            .count();
        CacheStats {
            hits: self.inner.hits.load(Ordering::Relaxed),
            misses: self.inner.misses.load(Ordering::Relaxed),
            coalesced: self.inner.coalesced.load(Ordering::Relaxed),
            fetches: self.inner.fetches.load(Ordering::Relaxed),
            entries: slots.len(),
            in_flight,
            capacity: self.inner.config.max_entries,
        }
    }
}

fn mark_invalidated<V>(slot: &mut Slot<V>) {
    match slot {
        Slot::Ready(entry) => entry.invalidated = true,
        Slot::InFlight { invalidated, .. } => *invalidated = true,
    }
}

impl<V> Default for QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;
    use zilnames_core::ZilnamesError;

    fn key(input: &str) -> CacheKey {
        CacheKey::new(QueryKind::Name, input, 32769)
    }

    fn counting(
        calls: &Arc<AtomicUsize>,
        value: Resolution<String>,
        delay: Duration,
    ) -> impl FnOnce() -> BoxFuture<'static, Resolution<String>> + Send + 'static {
        let calls = Arc::clone(calls);
        move || {
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                value
            }
            .boxed()
        }
    }

    fn found(s: &str) -> Resolution<String> {
        Resolution::Found(s.to_string())
    }

    #[tokio::test]
    async fn test_fresh_entry_skips_fetcher() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let first = cache
            .get_or_fetch(key("0xabc"), counting(&calls, found("a.zil"), Duration::ZERO))
            .await;
        let second = cache
            .get_or_fetch(key("0xabc"), counting(&calls, found("other.zil"), Duration::ZERO))
            .await;

        assert_eq!(first, found("a.zil"));
        assert_eq!(second, found("a.zil"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_fetch() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let (a, b) = tokio::join!(
            cache.get_or_fetch(key("0xabc"), counting(&calls, found("a.zil"), Duration::from_millis(30))),
            cache.get_or_fetch(key("0xabc"), counting(&calls, found("b.zil"), Duration::from_millis(30))),
        );

        assert_eq!(a, found("a.zil"));
        assert_eq!(b, found("a.zil"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats().coalesced, 1);
    }

    #[tokio::test]
    async fn test_distinct_keys_fetch_independently() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let main = CacheKey::new(QueryKind::Name, "0xabc", 32769);
        let test = CacheKey::new(QueryKind::Name, "0xabc", 33101);
        let avatar = CacheKey::new(QueryKind::Avatar, "0xabc", 32769);

        cache.get_or_fetch(main, counting(&calls, found("a"), Duration::ZERO)).await;
        cache.get_or_fetch(test, counting(&calls, found("b"), Duration::ZERO)).await;
        cache.get_or_fetch(avatar, counting(&calls, found("c"), Duration::ZERO)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(cache.len(), 3);
    }

    #[tokio::test]
    async fn test_dropped_waiter_does_not_cancel_fetch() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let abandoned = tokio::time::timeout(
            Duration::from_millis(5),
            cache.get_or_fetch(key("0xabc"), counting(&calls, found("a.zil"), Duration::from_millis(40))),
        )
        .await;
        assert!(abandoned.is_err());
        assert!(cache.state(&key("0xabc")).is_loading);

        let result = cache
            .get_or_fetch(key("0xabc"), counting(&calls, found("b.zil"), Duration::ZERO))
            .await;
        assert_eq!(result, found("a.zil"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_are_cached_then_expire() {
        let cache = QueryCache::with_config(CacheConfig::default().with_failure_ttl(0));
        let calls = Arc::new(AtomicUsize::new(0));
        let failure = Resolution::Failed(ZilnamesError::HttpError("down".into()));

        let first = cache
            .get_or_fetch(key("0xabc"), counting(&calls, failure.clone(), Duration::ZERO))
            .await;
        assert_eq!(first, failure);
        assert!(cache.state(&key("0xabc")).is_stale);

        let retry = cache
            .get_or_fetch(key("0xabc"), counting(&calls, found("a.zil"), Duration::ZERO))
            .await;
        assert_eq!(retry, found("a.zil"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failures_cached_within_ttl() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let failure = Resolution::Failed(ZilnamesError::HttpError("down".into()));

        cache
            .get_or_fetch(key("0xabc"), counting(&calls, failure.clone(), Duration::ZERO))
            .await;
        let again = cache
            .get_or_fetch(key("0xabc"), counting(&calls, found("a.zil"), Duration::ZERO))
            .await;

        assert_eq!(again, failure);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate_refetches_and_keeps_stale_value_visible() {
        let cache: QueryCache<String> = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        cache
            .get_or_fetch(key("0xabc"), counting(&calls, found("old.zil"), Duration::ZERO))
            .await;
        assert!(cache.invalidate(&key("0xabc")));
        assert!(!cache.invalidate(&key("0xdef")));

        let gate = Arc::new(Notify::new());
        let task = {
            let cache = cache.clone();
            let gate = Arc::clone(&gate);
            tokio::spawn(async move {
                cache
                    .get_or_fetch(key("0xabc"), move || async move {
                        gate.notified().await;
                        Resolution::Found("new.zil".to_string())
                    })
                    .await
            })
        };

        while !cache.state(&key("0xabc")).is_loading {
            tokio::task::yield_now().await;
        }
        let state = cache.state(&key("0xabc"));
        assert_eq!(state.resolution, Some(found("old.zil")));
        assert!(state.is_stale);

        gate.notify_one();
        assert_eq!(task.await.unwrap(), found("new.zil"));

        let state = cache.state(&key("0xabc"));
        assert_eq!(state.resolution, Some(found("new.zil")));
        assert!(!state.is_loading);
        assert!(!state.is_stale);
    }

    #[tokio::test]
    async fn test_invalidate_network() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for (input, chain_id) in [("a", 32769), ("b", 32769), ("c", 33101)] {
            cache
                .get_or_fetch(
                    CacheKey::new(QueryKind::Address, input, chain_id),
                    counting(&calls, found(input), Duration::ZERO),
                )
                .await;
        }

        assert_eq!(cache.invalidate_network(32769), 2);
        assert!(cache.state(&CacheKey::new(QueryKind::Address, "a", 32769)).is_stale);
        assert!(!cache.state(&CacheKey::new(QueryKind::Address, "c", 33101)).is_stale);
    }

    #[tokio::test]
    async fn test_removed_in_flight_result_is_not_stored() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let fetch = cache.get_or_fetch(key("0xabc"), counting(&calls, found("a.zil"), Duration::from_millis(20)));
        let remove = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            cache.remove(&key("0xabc"));
        };
        let (result, ()) = tokio::join!(fetch, remove);

        assert_eq!(result, found("a.zil"));
        assert_eq!(cache.state(&key("0xabc")), QueryState::idle());
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest_settled() {
        let cache = QueryCache::with_config(CacheConfig {
            max_entries: 2,
            ..CacheConfig::default()
        });
        let calls = Arc::new(AtomicUsize::new(0));

        for input in ["a", "b", "c"] {
            cache
                .get_or_fetch(key(input), counting(&calls, found(input), Duration::ZERO))
                .await;
            tokio::time::sleep(Duration::from_millis(2)).await;
        }

        assert_eq!(cache.len(), 2);
        assert!(cache.peek(&key("a")).is_none());
        assert_eq!(cache.peek(&key("c")), Some(found("c")));
    }

    #[tokio::test]
    async fn test_capacity_recovers_after_in_flight_overflow() {
        let cache = QueryCache::with_config(CacheConfig {
            max_entries: 1,
            ..CacheConfig::default()
        });
        let calls = Arc::new(AtomicUsize::new(0));

        let (a, b) = tokio::join!(
            cache.get_or_fetch(key("a"), counting(&calls, found("a"), Duration::from_millis(20))),
            cache.get_or_fetch(key("b"), counting(&calls, found("b"), Duration::from_millis(20))),
        );
        assert_eq!(a, found("a"));
        assert_eq!(b, found("b"));
        // Both were in flight together, so neither could be evicted
        assert_eq!(cache.len(), 2);

        cache
            .get_or_fetch(key("c"), counting(&calls, found("c"), Duration::ZERO))
            .await;
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.peek(&key("c")), Some(found("c")));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        cache
            .get_or_fetch(key("a"), counting(&calls, found("a"), Duration::ZERO))
            .await;
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_key_display() {
        let key = CacheKey::new(QueryKind::Address, "darthgus.zil", 32769);
        assert_eq!(key.to_string(), "address:darthgus.zil@32769");
    }
}
