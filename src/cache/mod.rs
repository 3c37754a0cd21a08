//! # Tag-Based Query Caching
//!
//! Read-through caching for query results with tag-based invalidation.
//!
//! ## Architecture
//!
//! Three pieces cooperate:
//!
//! - [`CacheTag`] - deterministic invalidation keys derived from entity ids.
//!   Two namespaces exist: question-level tags and job-info-level tags. A
//!   single cached read may register against both, so either a question edit
//!   or a job-info edit forces recomputation.
//! - [`CacheTagRegistry`] - process-wide version counters per tag. Writers
//!   call [`CacheTagRegistry::invalidate`] after a mutation; cached entries
//!   that observed an older version are recomputed on next read.
//! - [`TaggedQueryCache`] - a TTL + tag-validated result cache, one instance
//!   per result type. Loaders record their tag dependencies through a
//!   [`TagRecorder`] while they run, which allows tags discovered
//!   mid-computation (a row's parent id) to be registered.
//!
//! The registry is injectable state, created at process start and shared by
//! handle; there is no hidden singleton.

mod query_cache;
mod registry;
mod tags;

pub use query_cache::{TagRecorder, TaggedQueryCache};
pub use registry::CacheTagRegistry;
pub use tags::CacheTag;
