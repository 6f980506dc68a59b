//! # Data Query Cache
//!
//! Keyed, de-duplicated, revalidating cache of server resources. Keys
//! are a closed enum so invalidation scopes are checkable at compile
//! time instead of being spelled as ad hoc string tuples. The cache is
//! shared process-wide behind an `Arc`; every read goes through
//! [`QueryCache::fetch`] and every write-side refresh goes through
//! [`QueryCache::invalidate`] — components never touch each other's
//! entries directly.

pub mod mutation;

pub use mutation::MutationExecutor;

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, watch};

/// Type alias for a cached value behind type erasure.
type SharedValue = Arc<dyn Any + Send + Sync>;

/// Cache key for every server resource the client reads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Cars,
    CarsByCategory(String),
    Car(String),
    Categories,
    Featured,
    SellOrders,
    CustomOrders,
}

impl QueryKey {
    /// Whether invalidating `self` also marks `other` stale. The car
    /// collection is the prefix of every car-derived key.
    pub fn covers(&self, other: &QueryKey) -> bool {
        if self == other {
            return true;
        }
        matches!(
            (self, other),
            (QueryKey::Cars, QueryKey::CarsByCategory(_)) | (QueryKey::Cars, QueryKey::Car(_))
        )
    }
}

/// Snapshot a read resolves to: `data` and `error` can coexist when a
/// refresh fails over previously cached data (stale-while-error).
#[derive(Debug, Clone)]
pub struct QueryResult<T> {
    pub data: Option<Arc<T>>,
    pub error: Option<String>,
}

impl<T> QueryResult<T> {
    /// A gated-off query: no request issued, no data, no error.
    pub fn idle() -> Self {
        Self {
            data: None,
            error: None,
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

struct Entry {
    data: Option<SharedValue>,
    error: Option<String>,
    stale: bool,
    in_flight: bool,
    /// Bumped by every invalidation; a fetch only clears staleness when
    /// no invalidation arrived while it was in flight.
    generation: u64,
    /// Bumped when a fetch settles, waking joined callers.
    done: watch::Sender<u64>,
}

impl Entry {
    fn new() -> Self {
        let (done, _) = watch::channel(0);
        Self {
            data: None,
            error: None,
            stale: false,
            in_flight: false,
            generation: 0,
            done,
        }
    }
}

/// Process-wide cache of fetched resources.
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Entry>>,
    invalidations: broadcast::Sender<QueryKey>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

enum Claim {
    /// The entry already settled; return it as-is (data, error, or the
    /// stale-while-error pair of both).
    Hit(Option<SharedValue>, Option<String>),
    /// A fetch for this key is already in flight; wait for it.
    Join(watch::Receiver<u64>),
    /// This caller runs the fetcher.
    Lead { generation: u64 },
}

impl QueryCache {
    pub fn new() -> Self {
        let (invalidations, _) = broadcast::channel(64);
        Self {
            entries: Mutex::new(HashMap::new()),
            invalidations,
        }
    }

    /// Receiver of invalidation events, for consumers that re-fetch when
    /// a key they depend on goes stale.
    pub fn subscribe(&self) -> broadcast::Receiver<QueryKey> {
        self.invalidations.subscribe()
    }

    /// Fetch a resource, joining any in-flight request for the same key.
    /// The fetcher only runs when there is no fresh cached value and no
    /// request already in flight.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> QueryResult<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, crate::client::error::ApiError>>,
    {
        let generation = loop {
            match self.claim(&key) {
                Claim::Hit(value, error) => return resolve::<T>(value, error),
                Claim::Join(mut done) => {
                    // Joiners share the leader's settled result; the
                    // subscription was taken under the lock, so a
                    // completion between then and now still wakes us.
                    if done.changed().await.is_err() {
                        continue;
                    }
                    let (value, error) = self.snapshot(&key);
                    if value.is_some() || error.is_some() {
                        return resolve::<T>(value, error);
                    }
                }
                Claim::Lead { generation } => break generation,
            }
        };

        tracing::debug!(?key, "fetching");
        let result = fetcher().await;
        self.settle::<T>(&key, generation, result)
    }

    /// Gated fetch: when `enabled` is false (e.g. an empty id), no
    /// request is issued and the result is idle.
    pub async fn fetch_if<T, F, Fut>(
        &self,
        enabled: bool,
        key: QueryKey,
        fetcher: F,
    ) -> QueryResult<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, crate::client::error::ApiError>>,
    {
        if !enabled {
            return QueryResult::idle();
        }
        self.fetch(key, fetcher).await
    }

    /// Mark `key` and every key it covers stale, and notify subscribers.
    pub fn invalidate(&self, key: &QueryKey) {
        {
            let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            for (entry_key, entry) in entries.iter_mut() {
                if key.covers(entry_key) {
                    entry.stale = true;
                    entry.generation += 1;
                }
            }
            // The invalidated key itself may not have an entry yet;
            // create one so the staleness survives until first fetch.
            let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
            entry.stale = true;
        }
        tracing::debug!(?key, "invalidated");
        let _ = self.invalidations.send(key.clone());
    }

    fn claim(&self, key: &QueryKey) -> Claim {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let entry = entries.entry(key.clone()).or_insert_with(Entry::new);

        if entry.in_flight {
            return Claim::Join(entry.done.subscribe());
        }
        if !entry.stale && (entry.data.is_some() || entry.error.is_some()) {
            // Settled entry: cached data, or an error waiting for a
            // manual invalidation to retry.
            return Claim::Hit(entry.data.clone(), entry.error.clone());
        }
        entry.in_flight = true;
        Claim::Lead {
            generation: entry.generation,
        }
    }

    fn snapshot(&self, key: &QueryKey) -> (Option<SharedValue>, Option<String>) {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some(entry) => (entry.data.clone(), entry.error.clone()),
            None => (None, None),
        }
    }

    fn settle<T>(
        &self,
        key: &QueryKey,
        started_generation: u64,
        result: Result<T, crate::client::error::ApiError>,
    ) -> QueryResult<T>
    where
        T: Send + Sync + 'static,
    {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
        entry.in_flight = false;

        match result {
            Ok(value) => {
                let shared: SharedValue = Arc::new(value);
                entry.data = Some(Arc::clone(&shared));
                entry.error = None;
                if entry.generation == started_generation {
                    entry.stale = false;
                }
                entry.done.send_modify(|v| *v += 1);
                resolve::<T>(Some(shared), None)
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(?key, %message, "fetch failed");
                // Previous data stays untouched (stale-while-error); the
                // entry stops being stale so a manual invalidation is
                // what retries, not every subsequent read.
                entry.error = Some(message.clone());
                if entry.generation == started_generation {
                    entry.stale = false;
                }
                entry.done.send_modify(|v| *v += 1);
                resolve::<T>(entry.data.clone(), Some(message))
            }
        }
    }
}

fn resolve<T: Send + Sync + 'static>(
    value: Option<SharedValue>,
    error: Option<String>,
) -> QueryResult<T> {
    match value {
        Some(shared) => match shared.downcast::<T>() {
            Ok(data) => QueryResult {
                data: Some(data),
                error,
            },
            // Two readers disagreed about the key's payload type; a
            // programming error, reported instead of panicking.
            Err(_) => QueryResult {
                data: None,
                error: Some("cache entry type mismatch".to_string()),
            },
        },
        None => QueryResult { data: None, error },
    }
}
