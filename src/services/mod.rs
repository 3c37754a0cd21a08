//! # Services
//!
//! Request-facing read and write paths over the entity store, with tag-based
//! result caching.

pub mod questions;

pub use questions::{JobInfoSummary, QuestionDetail, QuestionService, QuestionSummary};
