//! # Question Service
//!
//! Cached, ownership-scoped reads of practice questions plus tag-invalidating
//! writes.
//!
//! ## Read paths
//!
//! Both fetches collapse "row absent", "row owned by someone else", and "row
//! not yet completed" into the same `None`, so a caller can never distinguish
//! another user's data from data that does not exist. Results are cached per
//! result type and validated against cache tags: a detail read depends on its
//! question's tag and, once the row resolves, on the parent job-info's tag;
//! a list read depends on the job-info-scoped questions tag.
//!
//! ## Write paths
//!
//! `insert_question` and `update_question` persist through the store and then
//! invalidate the question tag and the job-info-scoped questions tag using the
//! `(id, job_info_id)` pair RETURNED by the mutation. An update that matches
//! zero rows fails with `NotFound` before any tag is touched.

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cache::{CacheTag, CacheTagRegistry, TaggedQueryCache};
use crate::config::QueryCacheConfig;
use crate::error::{DataError, Result};
use crate::models::{
    ExperienceLevel, NewQuestion, Question, QuestionChanges, QuestionDifficulty, QuestionRef,
};
use crate::store::QuestionStore;

/// Full detail projection for a single completed question.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionDetail {
    pub id: Uuid,
    pub text: String,
    pub answer: String,
    pub feedback: String,
    pub difficulty: QuestionDifficulty,
    pub feedback_rating: Option<i32>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// List projection for dashboard views. Deliberately excludes the answer and
/// feedback bodies; those ship only with the single-question fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSummary {
    pub id: Uuid,
    pub text: String,
    pub difficulty: QuestionDifficulty,
    pub feedback_rating: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Question> for QuestionSummary {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            text: question.text,
            difficulty: question.difficulty,
            feedback_rating: question.feedback_rating,
            created_at: question.created_at,
            updated_at: question.updated_at,
        }
    }
}

/// Header projection of a job-info profile for its questions dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct JobInfoSummary {
    pub id: Uuid,
    pub name: String,
    pub title: Option<String>,
    pub experience_level: ExperienceLevel,
}

/// Cached read/write facade over a [`QuestionStore`].
///
/// Holds one cache per result type plus a shared, injected
/// [`CacheTagRegistry`]; the registry outlives the service and may be shared
/// with other services in the same process.
pub struct QuestionService<S: QuestionStore> {
    store: Arc<S>,
    registry: Arc<CacheTagRegistry>,
    detail_cache: TaggedQueryCache<Option<QuestionDetail>>,
    list_cache: TaggedQueryCache<Vec<QuestionSummary>>,
    job_info_cache: TaggedQueryCache<Option<JobInfoSummary>>,
}

impl<S: QuestionStore> QuestionService<S> {
    /// Build with environment-selected cache configuration.
    pub fn new(store: Arc<S>, registry: Arc<CacheTagRegistry>) -> Self {
        Self::new_with_config(store, registry, QueryCacheConfig::from_environment())
    }

    /// Build with explicit cache configuration (useful for testing).
    pub fn new_with_config(
        store: Arc<S>,
        registry: Arc<CacheTagRegistry>,
        config: QueryCacheConfig,
    ) -> Self {
        let detail_cache =
            TaggedQueryCache::new(Arc::clone(&registry), &config.question_detail, config.enabled);
        let list_cache =
            TaggedQueryCache::new(Arc::clone(&registry), &config.question_list, config.enabled);
        let job_info_cache =
            TaggedQueryCache::new(Arc::clone(&registry), &config.job_info, config.enabled);
        Self {
            store,
            registry,
            detail_cache,
            list_cache,
            job_info_cache,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn registry(&self) -> &Arc<CacheTagRegistry> {
        &self.registry
    }

    /// Fetch one completed question, scoped to its job info and owner.
    ///
    /// Returns `None` when the row is absent, belongs to another user, or is
    /// missing its answer or feedback. The negative result is cached under
    /// the same tags as a hit, so a later edit to the question or its parent
    /// recomputes the miss.
    pub async fn fetch_question(
        &self,
        job_info_id: Uuid,
        question_id: Uuid,
        user_id: &str,
    ) -> Result<Option<QuestionDetail>> {
        let key = format!("question_detail_{job_info_id}_{question_id}_{user_id}");
        if let Some(cached) = self.detail_cache.get(&key).await {
            return Ok(cached);
        }

        let recorder = self.detail_cache.recorder();
        recorder.record(CacheTag::question(question_id));

        let found = self
            .store
            .find_question_in_job_info(question_id, job_info_id)
            .await?;

        let detail = match found {
            None => None,
            Some(row) => {
                // Registered unconditionally once the row resolves, even if
                // the ownership check below rejects the requester: a parent
                // edit must invalidate this cached outcome either way.
                recorder.record(CacheTag::job_info(row.question.job_info_id));

                if row.owner_user_id != user_id {
                    None
                } else if !row.question.is_completed() {
                    None
                } else {
                    let question = row.question;
                    Some(QuestionDetail {
                        id: question.id,
                        text: question.text,
                        // is_completed() established both fields.
                        answer: question.answer.unwrap_or_default(),
                        feedback: question.feedback.unwrap_or_default(),
                        difficulty: question.difficulty,
                        feedback_rating: question.feedback_rating,
                        updated_at: question.updated_at,
                    })
                }
            }
        };

        self.detail_cache.set(key, detail.clone(), &recorder).await;
        Ok(detail)
    }

    /// Fetch all completed questions for a job info, newest-updated first.
    pub async fn fetch_completed_questions(
        &self,
        job_info_id: Uuid,
        user_id: &str,
    ) -> Result<Vec<QuestionSummary>> {
        let key = format!("completed_questions_{job_info_id}_{user_id}");
        if let Some(cached) = self.list_cache.get(&key).await {
            return Ok(cached);
        }

        let recorder = self.list_cache.recorder();
        recorder.record(CacheTag::questions_for_job_info(job_info_id));

        let rows = self.store.list_completed_questions(job_info_id).await?;

        let summaries: Vec<QuestionSummary> = rows
            .into_iter()
            .filter(|row| {
                // The query is already scoped to the job info, so a mismatch
                // here means the scoping upstream is broken. Never skipped.
                if row.owner_user_id == user_id {
                    true
                } else {
                    warn!(
                        question_id = %row.question.id,
                        job_info_id = %job_info_id,
                        "Dropping row owned by another user from scoped list"
                    );
                    false
                }
            })
            .map(|row| QuestionSummary::from(row.question))
            .collect();

        self.list_cache.set(key, summaries.clone(), &recorder).await;
        Ok(summaries)
    }

    /// Fetch a job-info header, scoped to its owner.
    pub async fn fetch_job_info(
        &self,
        job_info_id: Uuid,
        user_id: &str,
    ) -> Result<Option<JobInfoSummary>> {
        let key = format!("job_info_{job_info_id}_{user_id}");
        if let Some(cached) = self.job_info_cache.get(&key).await {
            return Ok(cached);
        }

        let recorder = self.job_info_cache.recorder();
        recorder.record(CacheTag::job_info(job_info_id));

        let summary = self
            .store
            .find_job_info_for_user(job_info_id, user_id)
            .await?
            .map(|job_info| JobInfoSummary {
                id: job_info.id,
                name: job_info.name,
                title: job_info.title,
                experience_level: job_info.experience_level,
            });

        self.job_info_cache.set(key, summary.clone(), &recorder).await;
        Ok(summary)
    }

    /// Insert a question and invalidate the affected cache tags.
    pub async fn insert_question(&self, question: NewQuestion) -> Result<QuestionRef> {
        let created = self.store.insert_question(question).await?;
        info!(question_id = %created.id, job_info_id = %created.job_info_id, "Inserted question");
        self.revalidate_question_cache(created);
        Ok(created)
    }

    /// Apply a partial update and invalidate the affected cache tags.
    ///
    /// Updating a row that does not exist is an explicit `NotFound` error;
    /// invalidation only ever runs against the projection RETURNED by the
    /// mutation, never against a dereferenced absence.
    pub async fn update_question(
        &self,
        id: Uuid,
        changes: QuestionChanges,
    ) -> Result<QuestionRef> {
        let updated = self
            .store
            .update_question(id, changes)
            .await?
            .ok_or(DataError::NotFound)?;
        info!(question_id = %updated.id, job_info_id = %updated.job_info_id, "Updated question");
        self.revalidate_question_cache(updated);
        Ok(updated)
    }

    /// Invalidate both tag namespaces for a mutated question: its own tag and
    /// the job-info-scoped questions tag of its parent.
    fn revalidate_question_cache(&self, question: QuestionRef) {
        self.registry.invalidate(&CacheTag::question(question.id));
        self.registry
            .invalidate(&CacheTag::questions_for_job_info(question.job_info_id));
    }
}
