#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # PrepDeck Core
//!
//! Rust data-access core for the PrepDeck interview practice platform.
//!
//! ## Overview
//!
//! Users practice with generated interview questions scoped to a "job info"
//! profile: a question is generated, answered, and then scored with feedback.
//! This crate owns the data layer for that flow: the relational models, the
//! ownership-scoped read paths, the mutation paths, and a tag-based cache
//! that keeps reads cheap without ever serving forever-stale data.
//!
//! ## Architecture
//!
//! - [`models`] - Question and JobInfo rows, mutation payloads, validation
//! - [`scopes`] - chainable query builders for list queries
//! - [`cache`] - cache tags, the process-wide tag registry, and the
//!   tag-validated query cache
//! - [`store`] - the `QuestionStore` seam with PostgreSQL and in-memory
//!   implementations
//! - [`services`] - cached read paths and tag-invalidating write paths
//! - [`permissions`] - subscription-tier gate for question creation
//! - [`database`] - connection pool management
//! - [`config`] - environment-aware database and cache configuration
//! - [`error`] - structured error handling
//!
//! ## Access control
//!
//! A question has no user column; its owner is the owner of its parent job
//! info, and every read joins through that table. Ownership failures are
//! indistinguishable from absence: both surface as `None`.
//!
//! ## Caching
//!
//! Reads register cache-tag dependencies while they run; writes invalidate
//! the tags for the mutated question and its parent profile. A read that
//! races a write may see either side, but any read started after the write's
//! invalidation returns recomputes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use prepdeck_core::cache::CacheTagRegistry;
//! use prepdeck_core::database::DatabaseConnection;
//! use prepdeck_core::services::QuestionService;
//! use prepdeck_core::store::PgQuestionStore;
//!
//! # async fn example(job_info_id: uuid::Uuid, question_id: uuid::Uuid)
//! # -> Result<(), Box<dyn std::error::Error>> {
//! let db = DatabaseConnection::new().await?;
//! let store = Arc::new(PgQuestionStore::new(db.pool().clone()));
//! let registry = Arc::new(CacheTagRegistry::new());
//! let service = QuestionService::new(store, registry);
//!
//! if let Some(detail) = service.fetch_question(job_info_id, question_id, "user_123").await? {
//!     println!("{}: {}", detail.difficulty, detail.text);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod permissions;
pub mod scopes;
pub mod services;
pub mod store;

pub use error::{DataError, Result};
