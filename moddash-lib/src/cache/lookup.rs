//! Single-flight lookup cache backed by DashMap

use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::FutureExt;
use futures::future::BoxFuture;
use futures::future::Shared;

use crate::error::Error;
use crate::response::Response;

type SharedFetch<V> = Shared<BoxFuture<'static, Result<Arc<V>, Arc<Error>>>>;

enum Slot<V> {
    Ready {
        value: Arc<V>,
        cached_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    },
    InFlight {
        ticket: u64,
        fetch: SharedFetch<V>,
    },
}

enum Plan<V> {
    Hit(Response<Arc<V>>),
    Join(u64, SharedFetch<V>),
    Lead(u64, SharedFetch<V>),
}

/// Memoized remote lookups with a freshness window and request collapsing.
///
/// `get_or_fetch` returns a fresh cached value when one exists. Otherwise
/// the first caller starts the fetch and every concurrent caller for the
/// same key awaits that same fetch instead of issuing its own. Failures are
/// handed to all waiters and never cached.
///
/// The `fetch` closure runs while a map shard is locked; it must only build
/// the future and must not touch this cache.
///
/// # Example
///
/// ```
/// use moddash_lib::cache::LookupCache;
///
/// let cache: LookupCache<&'static str, Vec<String>> = LookupCache::new();
/// assert!(cache.is_empty());
/// ```
pub struct LookupCache<K, V> {
    slots: DashMap<K, Slot<V>>,
    tickets: AtomicU64,
}

impl<K, V> Default for LookupCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for LookupCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupCache")
            .field("entries", &self.slots.len())
            .finish()
    }
}

impl<K, V> LookupCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
            tickets: AtomicU64::new(0),
        }
    }

    /// Returns the cached value for `key`, or fetches it.
    ///
    /// A zero `ttl` disables storage but still collapses concurrent callers.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: K,
        ttl: Duration,
        fetch: F,
    ) -> Result<Response<Arc<V>>, Error>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, Error>> + Send + 'static,
    {
        let (ticket, shared, leader) = match self.plan(&key, fetch) {
            Plan::Hit(response) => {
                log::trace!("[cache] hit");
                return Ok(response);
            }
            Plan::Join(ticket, shared) => {
                log::trace!("[cache] joining in-flight fetch {}", ticket);
                (ticket, shared, false)
            }
            Plan::Lead(ticket, shared) => {
                log::trace!("[cache] miss, starting fetch {}", ticket);
                (ticket, shared, true)
            }
        };

        let result = shared.await;

        // Whoever finishes first stores the result, so a dropped leader
        // cannot leave a finished fetch parked in the map.
        let stamps = self.settle(&key, ticket, &result, ttl);

        match result {
            Ok(value) if !leader => Ok(Response::joined(value)),
            Ok(value) => Ok(match stamps {
                Some((cached_at, expires_at)) => Response::cache_miss(value, cached_at, expires_at),
                None => Response::new(value),
            }),
            Err(e) => Err(Arc::try_unwrap(e).unwrap_or_else(Error::Shared)),
        }
    }

    fn plan<F, Fut>(&self, key: &K, fetch: F) -> Plan<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, Error>> + Send + 'static,
    {
        match self.slots.entry(key.clone()) {
            Entry::Occupied(mut occupied) => {
                match occupied.get() {
                    Slot::Ready {
                        value,
                        cached_at,
                        expires_at,
                    } if Utc::now() < *expires_at => {
                        return Plan::Hit(Response::cache_hit(
                            value.clone(),
                            *cached_at,
                            *expires_at,
                        ));
                    }
                    Slot::InFlight { ticket, fetch } => return Plan::Join(*ticket, fetch.clone()),
                    Slot::Ready { .. } => {}
                }

                let (ticket, shared) = self.start(fetch);
                occupied.insert(Slot::InFlight {
                    ticket,
                    fetch: shared.clone(),
                });
                Plan::Lead(ticket, shared)
            }
            Entry::Vacant(vacant) => {
                let (ticket, shared) = self.start(fetch);
                vacant.insert(Slot::InFlight {
                    ticket,
                    fetch: shared.clone(),
                });
                Plan::Lead(ticket, shared)
            }
        }
    }

    fn start<F, Fut>(&self, fetch: F) -> (u64, SharedFetch<V>)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, Error>> + Send + 'static,
    {
        let ticket = self.tickets.fetch_add(1, Ordering::Relaxed);
        let fut = fetch();
        let shared = async move { fut.await.map(Arc::new).map_err(Arc::new) }
            .boxed()
            .shared();
        (ticket, shared)
    }

    fn settle(
        &self,
        key: &K,
        ticket: u64,
        result: &Result<Arc<V>, Arc<Error>>,
        ttl: Duration,
    ) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let Entry::Occupied(mut occupied) = self.slots.entry(key.clone()) else {
            return None;
        };

        match occupied.get() {
            Slot::InFlight { ticket: current, .. } if *current == ticket => {}
            Slot::Ready {
                cached_at,
                expires_at,
                ..
            } => return Some((*cached_at, *expires_at)),
            Slot::InFlight { .. } => return None,
        }

        match result {
            Ok(value) if !ttl.is_zero() => {
                let cached_at = Utc::now();
                let expires_at = cached_at
                    + chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::zero());
                occupied.insert(Slot::Ready {
                    value: value.clone(),
                    cached_at,
                    expires_at,
                });
                Some((cached_at, expires_at))
            }
            _ => {
                occupied.remove();
                None
            }
        }
    }

    /// Drops the entry for `key`. An in-flight fetch keeps running for its
    /// current waiters but its result is not stored.
    pub fn invalidate(&self, key: &K) {
        self.slots.remove(key);
    }

    pub fn clear(&self) {
        self.slots.clear();
    }

    /// Number of entries, including expired and in-flight ones.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Removes expired entries. Returns the number removed.
    pub fn gc(&self) -> usize {
        let now = Utc::now();
        let mut removed = 0;
        self.slots.retain(|_, slot| match slot {
            Slot::Ready { expires_at, .. } if now >= *expires_at => {
                removed += 1;
                false
            }
            _ => true,
        });
        removed
    }
}
