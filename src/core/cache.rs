//! In-memory query cache for fetched backend resources
//!
//! Fetched lists are kept in an LRU keyed by resource + request parameters,
//! each entry expiring after a TTL. Mutations invalidate by resource, the same
//! way the dashboard UI invalidated every query under a key prefix.

use lru::LruCache;
use std::{
    fmt,
    future::Future,
    hash::Hash,
    num::NonZeroUsize,
    sync::{Mutex, MutexGuard},
    time::{Duration, Instant},
};

use crate::Result;

/// Backend resource a cached query belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Players,
    Injuries,
    Dashboard,
    Squad,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Resource::Players => "players",
            Resource::Injuries => "injuries",
            Resource::Dashboard => "dashboard",
            Resource::Squad => "squad",
        };
        write!(f, "{}", s)
    }
}

/// Generic cache key
pub trait CacheKey: Hash + Eq + Clone + Send + Sync {
    /// Resource used for bulk invalidation.
    fn resource(&self) -> Resource;

    /// Stable string form, used in logs.
    fn describe(&self) -> String;
}

/// Resource plus an ordered list of request parameters.
///
/// # Examples
///
/// ```rust
/// use roster_dash::core::cache::{CacheKey, QueryKey, Resource};
///
/// let key = QueryKey::new(Resource::Players).with_param("limit", 500);
/// assert_eq!(key.describe(), "players?limit=500");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: Resource,
    pub params: Vec<(String, String)>,
}

impl QueryKey {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.params.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_opt_param<T: fmt::Display>(self, name: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.with_param(name, v),
            None => self,
        }
    }
}

impl CacheKey for QueryKey {
    fn resource(&self) -> Resource {
        self.resource
    }

    fn describe(&self) -> String {
        if self.params.is_empty() {
            return self.resource.to_string();
        }
        let query = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.resource, query)
    }
}

/// Where a value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

struct Entry<V> {
    value: V,
    stored_at: Instant,
}

/// LRU cache with per-entry expiry.
pub struct QueryCache<K, V>
where
    K: CacheKey,
    V: Clone,
{
    entries: Mutex<LruCache<K, Entry<V>>>,
    capacity: usize,
    ttl: Duration,
}

impl<K, V> QueryCache<K, V>
where
    K: CacheKey,
    V: Clone,
{
    /// A zero capacity is bumped to one.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            capacity: capacity.get(),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<K, Entry<V>>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Fresh value for `key`, if any. Expired entries are dropped on access.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.lock();

        let expired = match entries.peek(key) {
            Some(entry) => entry.stored_at.elapsed() >= self.ttl,
            None => return None,
        };

        if expired {
            tracing::debug!(key = %key.describe(), "cache entry expired");
            entries.pop(key);
            return None;
        }

        entries.get(key).map(|entry| entry.value.clone())
    }

    pub fn put(&self, key: K, value: V) {
        self.lock().put(
            key,
            Entry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Return the cached value or run `fetch` and cache its result.
    ///
    /// Errors from `fetch` are returned as-is and nothing is cached.
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> Result<(V, CacheStatus)>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if let Some(value) = self.get(&key) {
            tracing::debug!(key = %key.describe(), "cache hit");
            return Ok((value, CacheStatus::Hit));
        }

        tracing::debug!(key = %key.describe(), "cache miss");
        let value = fetch().await?;
        self.put(key, value.clone());
        Ok((value, CacheStatus::Miss))
    }

    /// Drop one entry. Returns whether it was present.
    pub fn invalidate(&self, key: &K) -> bool {
        self.lock().pop(key).is_some()
    }

    /// Drop every entry belonging to `resource`. Returns how many were removed.
    pub fn invalidate_resource(&self, resource: Resource) -> usize {
        let mut entries = self.lock();
        let stale: Vec<K> = entries
            .iter()
            .filter(|(key, _)| key.resource() == resource)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &stale {
            entries.pop(key);
        }

        if !stale.is_empty() {
            tracing::debug!(%resource, removed = stale.len(), "invalidated cached queries");
        }
        stale.len()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// (entries in use, capacity)
    pub fn stats(&self) -> (usize, usize) {
        (self.lock().len(), self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RosterError;

    fn players_key(limit: u32) -> QueryKey {
        QueryKey::new(Resource::Players).with_param("limit", limit)
    }

    #[test]
    fn test_query_key_describe() {
        let key = QueryKey::new(Resource::Injuries)
            .with_param("limit", 500)
            .with_opt_param("is_active", Some(true))
            .with_opt_param::<u32>("player_id", None);
        assert_eq!(key.describe(), "injuries?limit=500&is_active=true");
        assert_eq!(QueryKey::new(Resource::Dashboard).describe(), "dashboard");
    }

    #[test]
    fn test_put_and_get() {
        let cache: QueryCache<QueryKey, Vec<u32>> = QueryCache::new(4, Duration::from_secs(60));
        cache.put(players_key(500), vec![1, 2, 3]);

        assert_eq!(cache.get(&players_key(500)), Some(vec![1, 2, 3]));
        assert_eq!(cache.get(&players_key(100)), None);
    }

    #[test]
    fn test_expired_entries_are_dropped() {
        let cache: QueryCache<QueryKey, u32> = QueryCache::new(4, Duration::ZERO);
        cache.put(players_key(500), 7);

        assert_eq!(cache.get(&players_key(500)), None);
        assert_eq!(cache.stats().0, 0);
    }

    #[test]
    fn test_lru_eviction() {
        let cache: QueryCache<QueryKey, u32> = QueryCache::new(2, Duration::from_secs(60));
        cache.put(players_key(1), 1);
        cache.put(players_key(2), 2);
        // touch 1 so 2 becomes least recently used
        assert_eq!(cache.get(&players_key(1)), Some(1));
        cache.put(players_key(3), 3);

        assert_eq!(cache.stats(), (2, 2));
        assert_eq!(cache.get(&players_key(2)), None);
        assert_eq!(cache.get(&players_key(1)), Some(1));
    }

    #[test]
    fn test_zero_capacity_is_bumped() {
        let cache: QueryCache<QueryKey, u32> = QueryCache::new(0, Duration::from_secs(60));
        assert_eq!(cache.stats().1, 1);
    }

    #[test]
    fn test_invalidate_single_key() {
        let cache: QueryCache<QueryKey, u32> = QueryCache::new(4, Duration::from_secs(60));
        cache.put(players_key(1), 1);

        assert!(cache.invalidate(&players_key(1)));
        assert!(!cache.invalidate(&players_key(1)));
    }

    #[test]
    fn test_invalidate_resource() {
        let cache: QueryCache<QueryKey, u32> = QueryCache::new(8, Duration::from_secs(60));
        cache.put(players_key(1), 1);
        cache.put(players_key(2), 2);
        cache.put(QueryKey::new(Resource::Injuries), 3);

        assert_eq!(cache.invalidate_resource(Resource::Players), 2);
        assert_eq!(cache.stats().0, 1);
        assert_eq!(cache.get(&QueryKey::new(Resource::Injuries)), Some(3));
    }

    #[test]
    fn test_clear() {
        let cache: QueryCache<QueryKey, u32> = QueryCache::new(8, Duration::from_secs(60));
        cache.put(players_key(1), 1);
        cache.clear();
        assert_eq!(cache.stats().0, 0);
    }

    #[tokio::test]
    async fn test_get_or_fetch_miss_then_hit() {
        let cache: QueryCache<QueryKey, u32> = QueryCache::new(4, Duration::from_secs(60));

        let (value, status) = cache
            .get_or_fetch(players_key(1), || async { Ok(41) })
            .await
            .unwrap();
        assert_eq!((value, status), (41, CacheStatus::Miss));

        let (value, status) = cache
            .get_or_fetch(players_key(1), || async { Ok(99) })
            .await
            .unwrap();
        assert_eq!((value, status), (41, CacheStatus::Hit));
    }

    #[tokio::test]
    async fn test_get_or_fetch_error_is_not_cached() {
        let cache: QueryCache<QueryKey, u32> = QueryCache::new(4, Duration::from_secs(60));

        let result = cache
            .get_or_fetch(players_key(1), || async {
                Err(RosterError::NotFound {
                    what: "players".to_string(),
                })
            })
            .await;
        assert!(result.is_err());
        assert_eq!(cache.stats().0, 0);
    }
}
