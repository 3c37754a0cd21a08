//! Tag-validated query result cache.
//!
//! One `TaggedQueryCache` instance caches one result type (detail lookups,
//! list projections, ...). Entries stay valid while every tag version they
//! observed at fill time is still current and their TTL has not elapsed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

use super::registry::CacheTagRegistry;
use super::tags::CacheTag;
use crate::config::CacheTypeConfig;

/// Collects the tag dependencies of one loader run.
///
/// Created before the loader starts, handed into it by reference; the loader
/// records each tag as it becomes known. Tags may depend on loaded data (a
/// question's parent job-info id is only known once the row resolves), which
/// is why dependencies cannot be declared up front.
pub struct TagRecorder {
    registry: Arc<CacheTagRegistry>,
    /// Global sequence at creation; if any recorded tag was invalidated past
    /// this point, the loader may have read data from either side of the
    /// invalidation and its result must not be cached.
    started_at_sequence: u64,
    recorded: Mutex<Vec<(CacheTag, u64)>>,
}

impl TagRecorder {
    pub fn new(registry: Arc<CacheTagRegistry>) -> Self {
        let started_at_sequence = registry.sequence();
        Self {
            registry,
            started_at_sequence,
            recorded: Mutex::new(Vec::new()),
        }
    }

    /// Register a dependency on a tag, snapshotting its current version.
    pub fn record(&self, tag: CacheTag) {
        let version = self.registry.version(&tag);
        let mut recorded = self.recorded.lock().unwrap_or_else(|e| e.into_inner());
        if !recorded.iter().any(|(existing, _)| *existing == tag) {
            recorded.push((tag, version));
        }
    }

    /// The recorded `(tag, version)` pairs, or `None` when a recorded tag was
    /// invalidated after this recorder was created (result unsafe to cache).
    fn dependencies(&self) -> Option<Vec<(CacheTag, u64)>> {
        let recorded = self.recorded.lock().unwrap_or_else(|e| e.into_inner());
        for (tag, version) in recorded.iter() {
            if *version > self.started_at_sequence {
                debug!(tag = %tag, "Tag invalidated mid-load; skipping cache fill");
                return None;
            }
        }
        Some(recorded.clone())
    }
}

struct CachedEntry<T> {
    value: T,
    dependencies: Vec<(CacheTag, u64)>,
    cached_at: Instant,
}

/// Query result cache for one result type, validated against tag versions.
pub struct TaggedQueryCache<T> {
    entries: Arc<RwLock<HashMap<String, CachedEntry<T>>>>,
    registry: Arc<CacheTagRegistry>,
    ttl: Duration,
    max_entries: usize,
    enabled: bool,
}

impl<T: Clone> TaggedQueryCache<T> {
    pub fn new(registry: Arc<CacheTagRegistry>, config: &CacheTypeConfig, enabled: bool) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            registry,
            ttl: config.ttl_duration(),
            max_entries: config.max_entries.max(1),
            enabled,
        }
    }

    /// Start a recorder for a loader run against this cache's registry.
    pub fn recorder(&self) -> TagRecorder {
        TagRecorder::new(Arc::clone(&self.registry))
    }

    /// Fetch a cached value if it is still fresh: within TTL and with every
    /// observed tag version still current.
    pub async fn get(&self, key: &str) -> Option<T> {
        if !self.enabled {
            return None;
        }

        let entries = self.entries.read().await;
        if let Some(entry) = entries.get(key) {
            if entry.cached_at.elapsed() < self.ttl && self.is_current(&entry.dependencies) {
                debug!(key, "Cache hit");
                return Some(entry.value.clone());
            }
        }
        debug!(key, "Cache miss");
        None
    }

    /// Store a loader result together with the tags it depends on. Results
    /// whose tags were invalidated while the loader ran are dropped.
    pub async fn set(&self, key: String, value: T, recorder: &TagRecorder) {
        if !self.enabled {
            return;
        }
        let Some(dependencies) = recorder.dependencies() else {
            return;
        };

        let mut entries = self.entries.write().await;
        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            Self::evict(&mut entries, self.ttl);
        }
        debug!(key = %key, tags = dependencies.len(), "Cached query result");
        entries.insert(
            key,
            CachedEntry {
                value,
                dependencies,
                cached_at: Instant::now(),
            },
        );
    }

    /// Drop every entry. Invalidation normally happens per-tag through the
    /// registry; this is for tests and shutdown paths.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn is_current(&self, dependencies: &[(CacheTag, u64)]) -> bool {
        dependencies
            .iter()
            .all(|(tag, observed)| self.registry.version(tag) == *observed)
    }

    /// Remove expired entries; if nothing expired, drop the oldest entry to
    /// make room.
    fn evict(entries: &mut HashMap<String, CachedEntry<T>>, ttl: Duration) {
        let before = entries.len();
        entries.retain(|_, entry| entry.cached_at.elapsed() < ttl);
        if entries.len() == before {
            if let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, entry)| entry.cached_at)
                .map(|(key, _)| key.clone())
            {
                entries.remove(&oldest);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_cache(registry: Arc<CacheTagRegistry>) -> TaggedQueryCache<String> {
        let config = CacheTypeConfig {
            ttl_seconds: 3600,
            max_entries: 4,
        };
        TaggedQueryCache::new(registry, &config, true)
    }

    #[tokio::test]
    async fn test_hit_after_fill() {
        let registry = Arc::new(CacheTagRegistry::new());
        let cache = test_cache(Arc::clone(&registry));

        let recorder = cache.recorder();
        recorder.record(CacheTag::question(Uuid::new_v4()));
        cache
            .set("key".to_string(), "value".to_string(), &recorder)
            .await;

        assert_eq!(cache.get("key").await, Some("value".to_string()));
    }

    #[tokio::test]
    async fn test_invalidation_forces_miss() {
        let registry = Arc::new(CacheTagRegistry::new());
        let cache = test_cache(Arc::clone(&registry));
        let tag = CacheTag::question(Uuid::new_v4());

        let recorder = cache.recorder();
        recorder.record(tag);
        cache
            .set("key".to_string(), "value".to_string(), &recorder)
            .await;

        registry.invalidate(&tag);
        assert_eq!(cache.get("key").await, None);
    }

    #[tokio::test]
    async fn test_unrelated_invalidation_keeps_entry() {
        let registry = Arc::new(CacheTagRegistry::new());
        let cache = test_cache(Arc::clone(&registry));

        let recorder = cache.recorder();
        recorder.record(CacheTag::question(Uuid::new_v4()));
        cache
            .set("key".to_string(), "value".to_string(), &recorder)
            .await;

        registry.invalidate(&CacheTag::question(Uuid::new_v4()));
        assert_eq!(cache.get("key").await, Some("value".to_string()));
    }

    #[tokio::test]
    async fn test_entry_depending_on_multiple_tags_dies_with_either() {
        let registry = Arc::new(CacheTagRegistry::new());
        let cache = test_cache(Arc::clone(&registry));
        let question_tag = CacheTag::question(Uuid::new_v4());
        let job_info_tag = CacheTag::job_info(Uuid::new_v4());

        let recorder = cache.recorder();
        recorder.record(question_tag);
        recorder.record(job_info_tag);
        cache
            .set("key".to_string(), "value".to_string(), &recorder)
            .await;

        registry.invalidate(&job_info_tag);
        assert_eq!(cache.get("key").await, None);
    }

    #[tokio::test]
    async fn test_mid_load_invalidation_skips_fill() {
        let registry = Arc::new(CacheTagRegistry::new());
        let cache = test_cache(Arc::clone(&registry));
        let tag = CacheTag::question(Uuid::new_v4());

        let recorder = cache.recorder();
        // Invalidation lands while the loader is "running".
        registry.invalidate(&tag);
        recorder.record(tag);
        cache
            .set("key".to_string(), "torn".to_string(), &recorder)
            .await;

        assert_eq!(cache.get("key").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_disabled_cache_never_stores() {
        let registry = Arc::new(CacheTagRegistry::new());
        let config = CacheTypeConfig {
            ttl_seconds: 3600,
            max_entries: 4,
        };
        let cache: TaggedQueryCache<String> = TaggedQueryCache::new(registry, &config, false);

        let recorder = cache.recorder();
        cache
            .set("key".to_string(), "value".to_string(), &recorder)
            .await;
        assert_eq!(cache.get("key").await, None);
    }

    #[tokio::test]
    async fn test_eviction_respects_max_entries() {
        let registry = Arc::new(CacheTagRegistry::new());
        let cache = test_cache(registry);

        for i in 0..6 {
            let recorder = cache.recorder();
            cache
                .set(format!("key-{i}"), format!("value-{i}"), &recorder)
                .await;
        }
        assert!(cache.len().await <= 4);
        // The newest entry always survives eviction.
        assert_eq!(cache.get("key-5").await, Some("value-5".to_string()));
    }
}
