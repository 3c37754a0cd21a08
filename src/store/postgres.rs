//! PostgreSQL-backed store delegating to the model layer.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::QuestionStore;
use crate::error::Result;
use crate::models::{JobInfo, NewQuestion, Question, QuestionChanges, QuestionRef, QuestionWithOwner};

/// Production [`QuestionStore`] over a shared connection pool.
#[derive(Clone)]
pub struct PgQuestionStore {
    pool: PgPool,
}

impl PgQuestionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl QuestionStore for PgQuestionStore {
    async fn find_question_in_job_info(
        &self,
        question_id: Uuid,
        job_info_id: Uuid,
    ) -> Result<Option<QuestionWithOwner>> {
        Question::find_in_job_info(&self.pool, question_id, job_info_id).await
    }

    async fn list_completed_questions(
        &self,
        job_info_id: Uuid,
    ) -> Result<Vec<QuestionWithOwner>> {
        let rows = Question::scope()
            .for_job_info(job_info_id)
            .completed()
            .newest_first()
            .all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<QuestionRef> {
        Question::create(&self.pool, question).await
    }

    async fn update_question(
        &self,
        id: Uuid,
        changes: QuestionChanges,
    ) -> Result<Option<QuestionRef>> {
        Question::update(&self.pool, id, changes).await
    }

    async fn find_job_info_for_user(&self, id: Uuid, user_id: &str) -> Result<Option<JobInfo>> {
        let found = JobInfo::find_for_user(&self.pool, id, user_id).await?;
        Ok(found)
    }
}
