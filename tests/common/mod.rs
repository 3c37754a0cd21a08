//! Shared test fixtures: builders over the in-memory store.

#![allow(dead_code)] // Not every integration target uses every builder.

use chrono::{DateTime, Duration, Utc};
use prepdeck_core::models::{ExperienceLevel, JobInfo, Question, QuestionDifficulty};
use prepdeck_core::store::InMemoryQuestionStore;
use uuid::Uuid;

/// Builder pattern for seeding test JobInfo rows.
pub struct JobInfoBuilder {
    user_id: String,
    name: String,
    title: Option<String>,
    experience_level: ExperienceLevel,
}

impl JobInfoBuilder {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            name: "Backend Engineer Prep".to_string(),
            title: None,
            experience_level: ExperienceLevel::MidLevel,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_experience_level(mut self, level: ExperienceLevel) -> Self {
        self.experience_level = level;
        self
    }

    pub fn build(self, store: &InMemoryQuestionStore) -> JobInfo {
        let now = Utc::now();
        let job_info = JobInfo {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            name: self.name,
            title: self.title,
            experience_level: self.experience_level,
            created_at: now,
            updated_at: now,
        };
        store.put_job_info(job_info.clone());
        job_info
    }
}

/// Builder pattern for seeding test Question rows with controlled timestamps.
pub struct QuestionBuilder {
    job_info_id: Uuid,
    text: String,
    difficulty: QuestionDifficulty,
    answer: Option<String>,
    feedback: Option<String>,
    feedback_rating: Option<i32>,
    updated_at: DateTime<Utc>,
}

impl QuestionBuilder {
    pub fn new(job_info_id: Uuid) -> Self {
        Self {
            job_info_id,
            text: "Walk me through a recent debugging session.".to_string(),
            difficulty: QuestionDifficulty::Medium,
            answer: None,
            feedback: None,
            feedback_rating: None,
            updated_at: Utc::now(),
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_difficulty(mut self, difficulty: QuestionDifficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn answered(mut self, answer: &str) -> Self {
        self.answer = Some(answer.to_string());
        self
    }

    /// Answer + feedback + rating in one call: a completed question.
    pub fn completed(mut self, answer: &str, feedback: &str, rating: i32) -> Self {
        self.answer = Some(answer.to_string());
        self.feedback = Some(feedback.to_string());
        self.feedback_rating = Some(rating);
        self
    }

    /// Shift updated_at relative to now, for ordering scenarios.
    pub fn updated_seconds_ago(mut self, seconds: i64) -> Self {
        self.updated_at = Utc::now() - Duration::seconds(seconds);
        self
    }

    pub fn build(self, store: &InMemoryQuestionStore) -> Question {
        let question = Question {
            id: Uuid::new_v4(),
            job_info_id: self.job_info_id,
            text: self.text,
            difficulty: self.difficulty,
            answer: self.answer,
            feedback: self.feedback,
            feedback_rating: self.feedback_rating,
            created_at: self.updated_at - Duration::hours(1),
            updated_at: self.updated_at,
        };
        store.put_question(question.clone());
        question
    }
}
