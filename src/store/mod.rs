//! # Entity Store
//!
//! The seam between the service layer and the relational store. The service
//! layer talks to a [`QuestionStore`] trait object; production wires in
//! [`PgQuestionStore`], tests and embedded use wire in
//! [`InMemoryQuestionStore`]. Both implementations expose identical filter
//! and ordering semantics, so the access-control and caching behavior above
//! them can be exercised without PostgreSQL.

mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{JobInfo, NewQuestion, QuestionChanges, QuestionRef, QuestionWithOwner};

pub use memory::InMemoryQuestionStore;
pub use postgres::PgQuestionStore;

/// Relational operations the read and write paths need.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Point lookup by the composite `(question id, job-info id)` predicate,
    /// joined with the parent profile's owner.
    async fn find_question_in_job_info(
        &self,
        question_id: Uuid,
        job_info_id: Uuid,
    ) -> Result<Option<QuestionWithOwner>>;

    /// All completed questions (answer and feedback both set) for a job info,
    /// most recently updated first, each joined with its owner.
    async fn list_completed_questions(&self, job_info_id: Uuid)
        -> Result<Vec<QuestionWithOwner>>;

    /// Insert a question, returning the `(id, job_info_id)` projection.
    async fn insert_question(&self, question: NewQuestion) -> Result<QuestionRef>;

    /// Apply a partial update. `None` means zero rows matched.
    async fn update_question(
        &self,
        id: Uuid,
        changes: QuestionChanges,
    ) -> Result<Option<QuestionRef>>;

    /// Job-info lookup scoped to its owner.
    async fn find_job_info_for_user(&self, id: Uuid, user_id: &str) -> Result<Option<JobInfo>>;
}
