//! Read cache with invalidate-on-mutation.
//!
//! Each read key moves through `Fresh -> Stale -> Loading -> Fresh`, or back
//! to `Stale` when the refetch fails. Successful writes mark the read-all key
//! of their resource kind stale, plus the read-one key of the record touched.
//! Invalidation is idempotent; the last refetch to complete wins.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::api::ApiError;
use crate::model::{List, ResourceKind, Task};

/// Identifies one cached read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// All lists.
    Lists,
    /// One list.
    List(u64),
    /// All todos.
    Todos,
    /// One todo.
    Todo(u64),
}

impl QueryKey {
    /// Resource kind the key reads.
    #[must_use]
    pub fn kind(self) -> ResourceKind {
        match self {
            Self::Lists | Self::List(_) => ResourceKind::Lists,
            Self::Todos | Self::Todo(_) => ResourceKind::Todos,
        }
    }

    /// The read-all key for a kind.
    #[must_use]
    pub fn all(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Lists => Self::Lists,
            ResourceKind::Todos => Self::Todos,
        }
    }

    /// The read-one key for a record of a kind.
    #[must_use]
    pub fn one(kind: ResourceKind, id: u64) -> Self {
        match kind {
            ResourceKind::Lists => Self::List(id),
            ResourceKind::Todos => Self::Todo(id),
        }
    }
}

/// Where a cached key stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Safe to serve without a refetch.
    Fresh,
    /// Must be refetched before it is treated as authoritative.
    Stale,
    /// A refetch is in flight.
    Loading,
}

/// A cached read result.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum CachedValue {
    Lists(Vec<List>),
    List(List),
    Todos(Vec<Task>),
    Todo(Task),
}

/// Types that can be stored in the cache.
pub trait Cacheable: Sized {
    /// Wraps the value for storage.
    fn into_cached(self) -> CachedValue;
    /// Unwraps a stored value of the matching shape.
    fn from_cached(value: CachedValue) -> Option<Self>;
}

macro_rules! cacheable {
    ($ty:ty, $variant:ident) => {
        impl Cacheable for $ty {
            fn into_cached(self) -> CachedValue {
                CachedValue::$variant(self)
            }

            fn from_cached(value: CachedValue) -> Option<Self> {
                match value {
                    CachedValue::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

cacheable!(Vec<List>, Lists);
cacheable!(List, List);
cacheable!(Vec<Task>, Todos);
cacheable!(Task, Todo);

/// Handed out by [`QueryCache::begin_fetch`] and returned when the fetch settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct FetchTicket {
    key: QueryKey,
    generation: u64,
}

impl FetchTicket {
    /// Key being fetched.
    #[must_use]
    pub fn key(self) -> QueryKey {
        self.key
    }
}

#[derive(Debug)]
struct Entry {
    state: CacheState,
    value: Option<CachedValue>,
    last_error: Option<ApiError>,
    // Bumped by every invalidation; a fetch that started under an older
    // generation cannot mark the key fresh.
    generation: u64,
}

impl Entry {
    fn new() -> Self {
        Self { state: CacheState::Stale, value: None, last_error: None, generation: 0 }
    }
}

/// Shared map from read key to cached state.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Entry>>,
}

impl QueryCache {
    /// An empty cache; every key starts out needing a fetch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The cached value, only if the key is fresh.
    #[must_use]
    pub fn fresh(&self, key: QueryKey) -> Option<CachedValue> {
        let entries = self.lock();
        let entry = entries.get(&key)?;
        (entry.state == CacheState::Fresh).then(|| entry.value.clone()).flatten()
    }

    /// The last value stored for a key, whatever its state.
    #[must_use]
    pub fn last_value(&self, key: QueryKey) -> Option<CachedValue> {
        self.lock().get(&key).and_then(|e| e.value.clone())
    }

    /// Current state of a key, `None` if it was never read or invalidated.
    #[must_use]
    pub fn state(&self, key: QueryKey) -> Option<CacheState> {
        self.lock().get(&key).map(|e| e.state)
    }

    /// Error from the most recent failed refetch, cleared on success.
    #[must_use]
    pub fn last_error(&self, key: QueryKey) -> Option<ApiError> {
        self.lock().get(&key).and_then(|e| e.last_error.clone())
    }

    /// Marks a key as loading.
    pub fn begin_fetch(&self, key: QueryKey) -> FetchTicket {
        let mut entries = self.lock();
        let entry = entries.entry(key).or_insert_with(Entry::new);
        entry.state = CacheState::Loading;
        debug!(?key, "cache refetch started");
        FetchTicket { key, generation: entry.generation }
    }

    /// Stores a refetched value.
    ///
    /// The key turns fresh unless it was invalidated while the fetch was in flight.
    pub fn complete_fetch(&self, ticket: FetchTicket, value: CachedValue) {
        let mut entries = self.lock();
        let entry = entries.entry(ticket.key).or_insert_with(Entry::new);
        entry.value = Some(value);
        entry.last_error = None;
        entry.state = if entry.generation == ticket.generation {
            CacheState::Fresh
        } else {
            CacheState::Stale
        };
        debug!(key = ?ticket.key, state = ?entry.state, "cache refetch finished");
    }

    /// Records a failed refetch. The key reverts to stale; any prior value is kept.
    pub fn fail_fetch(&self, ticket: FetchTicket, error: &ApiError) {
        let mut entries = self.lock();
        let entry = entries.entry(ticket.key).or_insert_with(Entry::new);
        entry.state = CacheState::Stale;
        entry.last_error = Some(error.clone());
        debug!(key = ?ticket.key, %error, "cache refetch failed");
    }

    /// Marks the read-all key for `kind` stale, and the read-one key for `id` if given.
    ///
    /// A read-one key that was never read is left absent.
    pub fn invalidate(&self, kind: ResourceKind, id: Option<u64>) {
        let mut entries = self.lock();
        let all = QueryKey::all(kind);
        mark_stale(all, entries.entry(all).or_insert_with(Entry::new));
        if let Some(key) = id.map(|id| QueryKey::one(kind, id)) {
            if let Some(entry) = entries.get_mut(&key) {
                mark_stale(key, entry);
            }
        }
    }
}

fn mark_stale(key: QueryKey, entry: &mut Entry) {
    entry.state = CacheState::Stale;
    entry.generation += 1;
    debug!(?key, "cache invalidated");
}
