//! # Query Scopes
//!
//! Chainable query builders for list queries against the questions table,
//! modeled as composable scopes over a SQLx `QueryBuilder`.
//!
//! The builder emits SQL sequentially, so structural clauses that must come
//! last (ORDER BY) are recorded as flags and appended only when the query is
//! built.

mod question;

pub use question::QuestionScope;
