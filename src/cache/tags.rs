//! Cache tag derivation.
//!
//! A tag is an opaque, deterministic key for one entity. Equal ids always
//! derive equal tags, so registration and invalidation meet at the same key
//! regardless of which code path produced it.

use std::fmt;
use uuid::Uuid;

/// An opaque cache-invalidation key associated with one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheTag {
    /// Invalidated when one question changes.
    Question(Uuid),
    /// Invalidated when any question under a job info changes; list reads for
    /// that job info depend on this tag.
    QuestionsForJobInfo(Uuid),
    /// Invalidated when the job-info row itself changes.
    JobInfo(Uuid),
}

impl CacheTag {
    pub fn question(id: Uuid) -> Self {
        CacheTag::Question(id)
    }

    pub fn questions_for_job_info(job_info_id: Uuid) -> Self {
        CacheTag::QuestionsForJobInfo(job_info_id)
    }

    pub fn job_info(id: Uuid) -> Self {
        CacheTag::JobInfo(id)
    }
}

impl fmt::Display for CacheTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheTag::Question(id) => write!(f, "questions:id:{id}"),
            CacheTag::QuestionsForJobInfo(id) => write!(f, "questions:jobInfo:{id}"),
            CacheTag::JobInfo(id) => write!(f, "jobInfos:id:{id}"),
        }
    }
}
