//! # JobInfo Model
//!
//! The parent profile entity under which practice questions are grouped.
//! Carries the authoritative owning-user reference: questions have no direct
//! user column, so every question access check joins through this table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use std::fmt;
use uuid::Uuid;

/// Candidate experience level for a job-info profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_infos_experience_level", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ExperienceLevel {
    Junior,
    MidLevel,
    Senior,
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceLevel::Junior => write!(f, "Junior"),
            ExperienceLevel::MidLevel => write!(f, "Mid-Level"),
            ExperienceLevel::Senior => write!(f, "Senior"),
        }
    }
}

/// A job-info profile row.
///
/// Ownership is immutable after creation as far as the read paths are
/// concerned; `user_id` is the external identity-provider id of the owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobInfo {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub title: Option<String>,
    pub experience_level: ExperienceLevel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobInfo {
    /// Find a job info by id, scoped to its owner. Ownership is folded into
    /// the predicate so a foreign-owned id behaves exactly like an absent one.
    pub async fn find_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: &str,
    ) -> Result<Option<JobInfo>, sqlx::Error> {
        sqlx::query_as::<_, JobInfo>(
            r#"
            SELECT id, user_id, name, title, experience_level, created_at, updated_at
            FROM job_infos
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_level_labels() {
        assert_eq!(ExperienceLevel::Junior.to_string(), "Junior");
        assert_eq!(ExperienceLevel::MidLevel.to_string(), "Mid-Level");
        assert_eq!(ExperienceLevel::Senior.to_string(), "Senior");
    }

    #[test]
    fn test_experience_level_serde_uses_kebab_case() {
        let json = serde_json::to_string(&ExperienceLevel::MidLevel).unwrap();
        assert_eq!(json, "\"mid-level\"");
    }
}
