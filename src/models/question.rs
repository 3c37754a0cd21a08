//! # Question Model
//!
//! Practice question rows and their mutation payloads.
//!
//! ## Overview
//!
//! A `Question` belongs to a [`JobInfo`](crate::models::JobInfo) profile and
//! moves through an implicit lifecycle: generated (answer and feedback both
//! NULL), answered (answer set), and completed (answer and feedback both set).
//! Only completed questions are visible through the read paths.
//!
//! ## Database Schema
//!
//! Maps to the `questions` table:
//! - `id`: Primary key (UUID)
//! - `job_info_id`: References the parent job-info profile (UUID, FK)
//! - `text`: Generated question prompt (TEXT)
//! - `difficulty`: `question_difficulty` enum (easy | medium | hard)
//! - `answer`: User-submitted answer (TEXT, NULL until submitted)
//! - `feedback`: Generated feedback (TEXT, NULL until generated)
//! - `feedback_rating`: 0-10 score attached to the feedback (INTEGER, NULL)
//!
//! Both mutations RETURN only `(id, job_info_id)` - exactly the pair the cache
//! layer needs to invalidate the affected tags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::fmt;
use uuid::Uuid;

use crate::error::{DataError, Result};

/// Bounds for `feedback_rating`.
pub const FEEDBACK_RATING_MIN: i32 = 0;
pub const FEEDBACK_RATING_MAX: i32 = 10;

/// Ordinal difficulty of a generated question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "questions_question_difficulty", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QuestionDifficulty {
    Easy,
    Medium,
    Hard,
}

impl QuestionDifficulty {
    pub fn ordinal(self) -> u8 {
        match self {
            QuestionDifficulty::Easy => 0,
            QuestionDifficulty::Medium => 1,
            QuestionDifficulty::Hard => 2,
        }
    }
}

impl fmt::Display for QuestionDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionDifficulty::Easy => write!(f, "Easy"),
            QuestionDifficulty::Medium => write!(f, "Medium"),
            QuestionDifficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// A practice question row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: Uuid,
    pub job_info_id: Uuid,
    pub text: String,
    pub difficulty: QuestionDifficulty,
    pub answer: Option<String>,
    pub feedback: Option<String>,
    pub feedback_rating: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Question {
    /// A question is completed once the user has answered it and feedback has
    /// been generated. List views filter on this conjunction.
    pub fn is_completed(&self) -> bool {
        self.answer.is_some() && self.feedback.is_some()
    }
}

/// A question row joined with its parent profile's owner, for access checks.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct QuestionWithOwner {
    #[sqlx(flatten)]
    pub question: Question,
    pub owner_user_id: String,
}

/// New question for creation (without generated fields).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuestion {
    pub job_info_id: Uuid,
    pub text: String,
    pub difficulty: QuestionDifficulty,
    pub answer: Option<String>,
    pub feedback: Option<String>,
    pub feedback_rating: Option<i32>,
}

/// Partial update payload; only fields set to `Some` are written.
///
/// Clearing answer or feedback back to NULL is intentionally not expressible -
/// the application never un-answers a question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionChanges {
    pub text: Option<String>,
    pub difficulty: Option<QuestionDifficulty>,
    pub answer: Option<String>,
    pub feedback: Option<String>,
    pub feedback_rating: Option<i32>,
}

impl QuestionChanges {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.difficulty.is_none()
            && self.answer.is_none()
            && self.feedback.is_none()
            && self.feedback_rating.is_none()
    }
}

/// The RETURNING projection of both question mutations: the affected row's id
/// and its parent job-info id, which together key the cache tags to
/// invalidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct QuestionRef {
    pub id: Uuid,
    pub job_info_id: Uuid,
}

fn validate_rating(rating: Option<i32>) -> Result<()> {
    if let Some(rating) = rating {
        if !(FEEDBACK_RATING_MIN..=FEEDBACK_RATING_MAX).contains(&rating) {
            return Err(DataError::validation(format!(
                "feedback_rating {rating} out of range ({FEEDBACK_RATING_MIN}-{FEEDBACK_RATING_MAX})"
            )));
        }
    }
    Ok(())
}

impl NewQuestion {
    /// Validate and normalize the payload before it reaches the store.
    pub fn sanitize(mut self) -> Result<NewQuestion> {
        self.text = self.text.trim().to_string();
        if self.text.is_empty() {
            return Err(DataError::validation("question text must not be blank"));
        }
        validate_rating(self.feedback_rating)?;
        Ok(self)
    }
}

impl QuestionChanges {
    /// Validate the change set. An empty set is rejected rather than treated
    /// as a successful no-op write.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(DataError::validation("update payload contains no fields"));
        }
        if let Some(text) = &self.text {
            if text.trim().is_empty() {
                return Err(DataError::validation("question text must not be blank"));
            }
        }
        validate_rating(self.feedback_rating)?;
        Ok(())
    }
}

impl Question {
    /// Insert a new question, returning the `(id, job_info_id)` projection.
    pub async fn create(pool: &PgPool, question: NewQuestion) -> Result<QuestionRef> {
        let question = question.sanitize()?;

        let created = sqlx::query_as::<_, QuestionRef>(
            r#"
            INSERT INTO questions (
                id, job_info_id, text, difficulty, answer, feedback, feedback_rating,
                created_at, updated_at
            )
            VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING id, job_info_id
            "#,
        )
        .bind(question.job_info_id)
        .bind(&question.text)
        .bind(question.difficulty)
        .bind(&question.answer)
        .bind(&question.feedback)
        .bind(question.feedback_rating)
        .fetch_one(pool)
        .await?;

        Ok(created)
    }

    /// Apply a partial update. Returns `None` when no row matched the id - the
    /// caller decides how to surface that (the service maps it to NotFound
    /// before touching any cache tag).
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        changes: QuestionChanges,
    ) -> Result<Option<QuestionRef>> {
        changes.validate()?;

        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("UPDATE questions SET updated_at = NOW()");

        if let Some(text) = changes.text {
            builder.push(", text = ");
            builder.push_bind(text);
        }
        if let Some(difficulty) = changes.difficulty {
            builder.push(", difficulty = ");
            builder.push_bind(difficulty);
        }
        if let Some(answer) = changes.answer {
            builder.push(", answer = ");
            builder.push_bind(answer);
        }
        if let Some(feedback) = changes.feedback {
            builder.push(", feedback = ");
            builder.push_bind(feedback);
        }
        if let Some(rating) = changes.feedback_rating {
            builder.push(", feedback_rating = ");
            builder.push_bind(rating);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(" RETURNING id, job_info_id");

        let updated = builder
            .build_query_as::<QuestionRef>()
            .fetch_optional(pool)
            .await?;

        Ok(updated)
    }

    /// Point lookup by the composite `(id, job_info_id)` predicate, joined
    /// with the parent profile's owner. Matching on both ids defends against
    /// id confusion across job infos.
    pub async fn find_in_job_info(
        pool: &PgPool,
        question_id: Uuid,
        job_info_id: Uuid,
    ) -> Result<Option<QuestionWithOwner>> {
        let found = sqlx::query_as::<_, QuestionWithOwner>(
            r#"
            SELECT questions.id, questions.job_info_id, questions.text, questions.difficulty,
                   questions.answer, questions.feedback, questions.feedback_rating,
                   questions.created_at, questions.updated_at,
                   job_infos.user_id AS owner_user_id
            FROM questions
            INNER JOIN job_infos ON job_infos.id = questions.job_info_id
            WHERE questions.id = $1 AND questions.job_info_id = $2
            "#,
        )
        .bind(question_id)
        .bind(job_info_id)
        .fetch_optional(pool)
        .await?;

        Ok(found)
    }
}
