//! In-memory store with the same semantics as the PostgreSQL implementation.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use super::QuestionStore;
use crate::error::{DataError, Result};
use crate::models::{
    JobInfo, NewQuestion, Question, QuestionChanges, QuestionRef, QuestionWithOwner,
};

/// DashMap-backed [`QuestionStore`] for tests and single-process embedding.
#[derive(Debug, Default)]
pub struct InMemoryQuestionStore {
    job_infos: DashMap<Uuid, JobInfo>,
    questions: DashMap<Uuid, Question>,
}

impl InMemoryQuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a job-info row directly (the job-info write path is owned by a
    /// different slice of the application).
    pub fn put_job_info(&self, job_info: JobInfo) {
        self.job_infos.insert(job_info.id, job_info);
    }

    /// Seed a fully-formed question row, bypassing generated ids and
    /// timestamps. Intended for test fixtures.
    pub fn put_question(&self, question: Question) {
        self.questions.insert(question.id, question);
    }

    pub fn get_question(&self, id: Uuid) -> Option<Question> {
        self.questions.get(&id).map(|q| q.value().clone())
    }

    fn owner_of(&self, job_info_id: Uuid) -> Option<String> {
        self.job_infos.get(&job_info_id).map(|j| j.user_id.clone())
    }
}

#[async_trait]
impl QuestionStore for InMemoryQuestionStore {
    async fn find_question_in_job_info(
        &self,
        question_id: Uuid,
        job_info_id: Uuid,
    ) -> Result<Option<QuestionWithOwner>> {
        let Some(question) = self.questions.get(&question_id) else {
            return Ok(None);
        };
        if question.job_info_id != job_info_id {
            return Ok(None);
        }
        let Some(owner_user_id) = self.owner_of(question.job_info_id) else {
            return Ok(None);
        };
        Ok(Some(QuestionWithOwner {
            question: question.value().clone(),
            owner_user_id,
        }))
    }

    async fn list_completed_questions(
        &self,
        job_info_id: Uuid,
    ) -> Result<Vec<QuestionWithOwner>> {
        let Some(owner_user_id) = self.owner_of(job_info_id) else {
            return Ok(Vec::new());
        };

        let mut rows: Vec<QuestionWithOwner> = self
            .questions
            .iter()
            .filter(|entry| entry.job_info_id == job_info_id && entry.is_completed())
            .map(|entry| QuestionWithOwner {
                question: entry.value().clone(),
                owner_user_id: owner_user_id.clone(),
            })
            .collect();

        rows.sort_by(|a, b| b.question.updated_at.cmp(&a.question.updated_at));
        Ok(rows)
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<QuestionRef> {
        let question = question.sanitize()?;
        if !self.job_infos.contains_key(&question.job_info_id) {
            // Parity with the FK constraint on the relational store.
            return Err(DataError::validation(format!(
                "job info {} does not exist",
                question.job_info_id
            )));
        }

        let now = Utc::now();
        let row = Question {
            id: Uuid::new_v4(),
            job_info_id: question.job_info_id,
            text: question.text,
            difficulty: question.difficulty,
            answer: question.answer,
            feedback: question.feedback,
            feedback_rating: question.feedback_rating,
            created_at: now,
            updated_at: now,
        };
        let created = QuestionRef {
            id: row.id,
            job_info_id: row.job_info_id,
        };
        self.questions.insert(row.id, row);
        Ok(created)
    }

    async fn update_question(
        &self,
        id: Uuid,
        changes: QuestionChanges,
    ) -> Result<Option<QuestionRef>> {
        changes.validate()?;

        let Some(mut question) = self.questions.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(text) = changes.text {
            question.text = text;
        }
        if let Some(difficulty) = changes.difficulty {
            question.difficulty = difficulty;
        }
        if let Some(answer) = changes.answer {
            question.answer = Some(answer);
        }
        if let Some(feedback) = changes.feedback {
            question.feedback = Some(feedback);
        }
        if let Some(rating) = changes.feedback_rating {
            question.feedback_rating = Some(rating);
        }
        question.updated_at = Utc::now();

        Ok(Some(QuestionRef {
            id: question.id,
            job_info_id: question.job_info_id,
        }))
    }

    async fn find_job_info_for_user(&self, id: Uuid, user_id: &str) -> Result<Option<JobInfo>> {
        Ok(self
            .job_infos
            .get(&id)
            .filter(|j| j.user_id == user_id)
            .map(|j| j.value().clone()))
    }
}
