//! # Question Scopes
//!
//! Query scopes for the Question model: job-info scoping, completion
//! filtering, and recency ordering. Every result row carries its parent
//! profile's owner for access checks, so the owner join is part of the base
//! query rather than an opt-in.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::{Question, QuestionWithOwner};

/// Query builder for Question scopes.
///
/// Ordering is recorded as a flag and emitted only when the query is built,
/// so scopes may be chained in any order without producing ORDER BY ahead of
/// a WHERE clause.
pub struct QuestionScope {
    query: QueryBuilder<'static, Postgres>,
    has_conditions: bool,
    order_newest_first: bool,
    order_applied: bool,
}

impl Question {
    /// Start building a scoped query.
    pub fn scope() -> QuestionScope {
        let query = QueryBuilder::new(
            "SELECT questions.id, questions.job_info_id, questions.text, questions.difficulty, \
             questions.answer, questions.feedback, questions.feedback_rating, \
             questions.created_at, questions.updated_at, \
             job_infos.user_id AS owner_user_id \
             FROM questions \
             INNER JOIN job_infos ON job_infos.id = questions.job_info_id",
        );
        QuestionScope {
            query,
            has_conditions: false,
            order_newest_first: false,
            order_applied: false,
        }
    }
}

impl QuestionScope {
    /// Emit the WHERE/AND connective for the next condition.
    fn begin_condition(&mut self) {
        if self.has_conditions {
            self.query.push(" AND ");
        } else {
            self.query.push(" WHERE ");
            self.has_conditions = true;
        }
    }

    fn add_condition(&mut self, condition: &str) {
        self.begin_condition();
        self.query.push(condition);
    }

    /// Scope to a single job-info profile.
    pub fn for_job_info(mut self, job_info_id: Uuid) -> Self {
        self.begin_condition();
        self.query.push("questions.job_info_id = ");
        self.query.push_bind(job_info_id);
        self
    }

    /// Only questions with both an answer and feedback.
    pub fn completed(mut self) -> Self {
        self.add_condition("questions.answer IS NOT NULL AND questions.feedback IS NOT NULL");
        self
    }

    /// Most recently updated first.
    pub fn newest_first(mut self) -> Self {
        self.order_newest_first = true;
        self
    }

    /// Append the deferred ORDER BY once all conditions are in place.
    fn apply_order(&mut self) {
        if self.order_newest_first && !self.order_applied {
            self.query.push(" ORDER BY questions.updated_at DESC");
            self.order_applied = true;
        }
    }

    /// Execute and return all matching rows with their owners.
    pub async fn all(mut self, pool: &PgPool) -> Result<Vec<QuestionWithOwner>, sqlx::Error> {
        self.apply_order();
        self.query
            .build_query_as::<QuestionWithOwner>()
            .fetch_all(pool)
            .await
    }

    /// The finalized SQL, for diagnostics and tests.
    pub fn sql(&mut self) -> &str {
        self.apply_order();
        self.query.sql()
    }
}
