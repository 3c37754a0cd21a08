//! Process-wide tag version registry.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use super::tags::CacheTag;

/// Version counters per cache tag.
///
/// Every invalidation advances a global sequence and records it as the tag's
/// current version. A cached entry stores the versions it observed at fill
/// time; the entry is stale as soon as any of those tags carries a newer
/// version. Invalidation is therefore at-least-once and monotonic: once an
/// `invalidate` call returns, any read that starts afterwards recomputes.
///
/// Concurrent invalidations and registrations interleave freely; the worst
/// outcome of a race is an extra recomputation, never a forever-stale entry.
#[derive(Debug, Default)]
pub struct CacheTagRegistry {
    versions: DashMap<CacheTag, u64>,
    sequence: AtomicU64,
}

impl CacheTagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current version of a tag. Tags that were never invalidated report 0.
    pub fn version(&self, tag: &CacheTag) -> u64 {
        self.versions.get(tag).map(|v| *v).unwrap_or(0)
    }

    /// The global invalidation sequence. A loader snapshots this before it
    /// starts reading so the cache can tell whether an invalidation landed
    /// while the loader was in flight.
    pub fn sequence(&self) -> u64 {
        self.sequence.load(Ordering::Acquire)
    }

    /// Mark every cached result that depends on this tag as stale.
    pub fn invalidate(&self, tag: &CacheTag) {
        let version = self.sequence.fetch_add(1, Ordering::AcqRel) + 1;
        // Keep per-tag versions monotonic under racing writers.
        self.versions
            .entry(*tag)
            .and_modify(|current| {
                if *current < version {
                    *current = version;
                }
            })
            .or_insert(version);
        info!(tag = %tag, version, "Invalidated cache tag");
    }
}
